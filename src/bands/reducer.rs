//! Band reducer: averages contiguous slices of a spectrum into bands.

use super::allocation::{AllocationCache, BandAllocation};
use crate::params::AnalyserConfig;

/// Reduces a sample frame to a band frame using a cached allocation
#[derive(Debug, Default)]
pub struct BandReducer {
    cache: AllocationCache,
}

impl BandReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocation for `config`, recomputed only when the configuration changed
    pub fn allocation(&mut self, config: &AnalyserConfig) -> &BandAllocation {
        self.cache.get(
            config.sample_count(),
            config.band_count(),
            config.minimum_sample_count(),
        )
    }

    /// Reduce `samples` into `bands`.
    ///
    /// `bands` is resized to the configured band count when it drifted and
    /// cleared before every pass, so no value survives from a previous frame.
    pub fn reduce(&mut self, config: &AnalyserConfig, samples: &[f32], bands: &mut Vec<f32>) {
        if bands.len() != config.band_count() {
            bands.resize(config.band_count(), 0.0);
        }
        let allocation = self.allocation(config);
        average_bands(samples, allocation, bands);
    }
}

/// Write the mean of each band's slice of `samples` into `bands`.
///
/// Bands are consumed in index order over disjoint contiguous slices. A band
/// with no samples stays at 0, and any non-finite mean is coerced to 0.
pub fn average_bands(samples: &[f32], allocation: &BandAllocation, bands: &mut [f32]) {
    bands.fill(0.0);

    for (band, range) in bands.iter_mut().zip(allocation.ranges()) {
        let count = range.len();
        if count == 0 {
            continue;
        }

        let start = range.start.min(samples.len());
        let end = range.end.min(samples.len());
        let total: f32 = samples[start..end].iter().sum();

        let mean = total / count as f32;
        *band = if mean.is_finite() { mean } else { 0.0 };
    }
}
