//! Analyser configuration: sample count, band count and per-band floor.

use log::debug;

use crate::audio::WindowFunction;

/// Smallest spectrum length the analyser accepts
pub const MIN_SAMPLE_COUNT: usize = 64;
/// Largest spectrum length the analyser accepts
pub const MAX_SAMPLE_COUNT: usize = 8192;
/// Fewest output bands
pub const MIN_BAND_COUNT: usize = 2;
/// Most output bands
pub const MAX_BAND_COUNT: usize = 16;
/// Upper bound on the per-band sample floor
pub const MAX_MINIMUM_SAMPLE_COUNT: usize = 500;

/// Spectrum-to-band reduction parameters
///
/// Every constructor and setter clamps its input, so a value of this type
/// always satisfies:
/// - `sample_count` is a power of two in [64, 8192]
/// - `band_count` is even and in [2, 16]
/// - `minimum_sample_count` is in [0, 500]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyserConfig {
    sample_count: usize,
    band_count: usize,
    minimum_sample_count: usize,
    window: WindowFunction,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            sample_count: 2048,
            band_count: 8,
            minimum_sample_count: 1,
            window: WindowFunction::Blackman,
        }
    }
}

impl AnalyserConfig {
    /// Build a configuration, clamping every value into its valid range
    pub fn new(sample_count: usize, band_count: usize, minimum_sample_count: usize) -> Self {
        Self::default()
            .with_sample_count(sample_count)
            .with_band_count(band_count)
            .with_minimum_sample_count(minimum_sample_count)
    }

    /// Number of spectrum samples per channel (FFT bins)
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Number of output bands per channel
    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// Samples guaranteed to every band before the remainder is distributed
    pub fn minimum_sample_count(&self) -> usize {
        self.minimum_sample_count
    }

    /// Window applied by the spectrum source
    pub fn window(&self) -> WindowFunction {
        self.window
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.set_sample_count(sample_count);
        self
    }

    pub fn with_band_count(mut self, band_count: usize) -> Self {
        self.set_band_count(band_count);
        self
    }

    pub fn with_minimum_sample_count(mut self, minimum_sample_count: usize) -> Self {
        self.set_minimum_sample_count(minimum_sample_count);
        self
    }

    pub fn with_window(mut self, window: WindowFunction) -> Self {
        self.window = window;
        self
    }

    /// Set the sample count, snapping to the closest power of two in range
    pub fn set_sample_count(&mut self, sample_count: usize) {
        let clamped =
            closest_power_of_two(sample_count).clamp(MIN_SAMPLE_COUNT, MAX_SAMPLE_COUNT);
        if clamped != sample_count {
            debug!("sample count {} clamped to {}", sample_count, clamped);
        }
        self.sample_count = clamped;
    }

    /// Set the band count, rounding odd values up and clamping to range
    pub fn set_band_count(&mut self, band_count: usize) {
        let even = band_count + band_count % 2;
        let clamped = even.clamp(MIN_BAND_COUNT, MAX_BAND_COUNT);
        if clamped != band_count {
            debug!("band count {} clamped to {}", band_count, clamped);
        }
        self.band_count = clamped;
    }

    pub fn set_minimum_sample_count(&mut self, minimum_sample_count: usize) {
        let clamped = minimum_sample_count.min(MAX_MINIMUM_SAMPLE_COUNT);
        if clamped != minimum_sample_count {
            debug!(
                "minimum sample count {} clamped to {}",
                minimum_sample_count, clamped
            );
        }
        self.minimum_sample_count = clamped;
    }

    pub fn set_window(&mut self, window: WindowFunction) {
        self.window = window;
    }
}

/// Nearest power of two to `value`; ties round up
pub fn closest_power_of_two(value: usize) -> usize {
    if value <= 1 {
        return 1;
    }
    let next = value.checked_next_power_of_two().unwrap_or(1 << (usize::BITS - 1));
    if next == value {
        return value;
    }
    let prev = next / 2;
    if value - prev < next - value {
        prev
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_power_of_two() {
        assert_eq!(closest_power_of_two(0), 1);
        assert_eq!(closest_power_of_two(1), 1);
        assert_eq!(closest_power_of_two(3), 4);
        assert_eq!(closest_power_of_two(5), 4);
        assert_eq!(closest_power_of_two(6), 8);
        assert_eq!(closest_power_of_two(1000), 1024);
        assert_eq!(closest_power_of_two(1500), 1024);
        assert_eq!(closest_power_of_two(2048), 2048);
    }

    #[test]
    fn test_sample_count_clamping() {
        assert_eq!(AnalyserConfig::new(10, 8, 1).sample_count(), 64);
        assert_eq!(AnalyserConfig::new(100_000, 8, 1).sample_count(), 8192);
        assert_eq!(AnalyserConfig::new(3000, 8, 1).sample_count(), 2048);
        assert_eq!(AnalyserConfig::new(3100, 8, 1).sample_count(), 4096);
    }

    #[test]
    fn test_band_count_is_even_and_in_range() {
        assert_eq!(AnalyserConfig::new(2048, 0, 1).band_count(), 2);
        assert_eq!(AnalyserConfig::new(2048, 7, 1).band_count(), 8);
        assert_eq!(AnalyserConfig::new(2048, 15, 1).band_count(), 16);
        assert_eq!(AnalyserConfig::new(2048, 40, 1).band_count(), 16);
    }

    #[test]
    fn test_minimum_sample_count_clamping() {
        assert_eq!(AnalyserConfig::new(2048, 8, 0).minimum_sample_count(), 0);
        assert_eq!(AnalyserConfig::new(2048, 8, 9999).minimum_sample_count(), 500);
    }

    #[test]
    fn test_default_matches_documented_values() {
        let config = AnalyserConfig::default();
        assert_eq!(config.sample_count(), 2048);
        assert_eq!(config.band_count(), 8);
        assert_eq!(config.minimum_sample_count(), 1);
        assert_eq!(config.window(), WindowFunction::Blackman);
    }
}
