//! Window functions applied before the spectrum transform.

use std::f32::consts::PI;

/// Window shape applied to a block before the FFT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowFunction {
    Rectangular,
    Triangle,
    Hamming,
    Hanning,
    #[default]
    Blackman,
    BlackmanHarris,
}

impl WindowFunction {
    /// Window coefficient for `index` in a window of `size` samples
    pub fn coefficient(self, index: usize, size: usize) -> f32 {
        if size <= 1 {
            return 1.0;
        }
        let x = index as f32 / (size as f32 - 1.0);

        match self {
            WindowFunction::Rectangular => 1.0,
            WindowFunction::Triangle => 1.0 - (2.0 * x - 1.0).abs(),
            WindowFunction::Hamming => 0.54 - 0.46 * (2.0 * PI * x).cos(),
            WindowFunction::Hanning => hann_window(index, size),
            WindowFunction::Blackman => {
                0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
            }
            WindowFunction::BlackmanHarris => {
                0.35875 - 0.48829 * (2.0 * PI * x).cos() + 0.14128 * (4.0 * PI * x).cos()
                    - 0.01168 * (6.0 * PI * x).cos()
            }
        }
    }

    /// Fill `out` with this window's coefficients
    pub fn fill(self, out: &mut [f32]) {
        let size = out.len();
        for (i, w) in out.iter_mut().enumerate() {
            *w = self.coefficient(i, size);
        }
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [WindowFunction; 6] = [
        WindowFunction::Rectangular,
        WindowFunction::Triangle,
        WindowFunction::Hamming,
        WindowFunction::Hanning,
        WindowFunction::Blackman,
        WindowFunction::BlackmanHarris,
    ];

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_blackman_edges_and_peak() {
        let size = 1025;
        assert_abs_diff_eq!(WindowFunction::Blackman.coefficient(0, size), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            WindowFunction::Blackman.coefficient(size - 1, size),
            0.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(WindowFunction::Blackman.coefficient(512, size), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_windows_are_symmetric_and_bounded() {
        let size = 64;
        for window in ALL {
            for i in 0..size {
                let w = window.coefficient(i, size);
                assert!((-1e-6..=1.0 + 1e-6).contains(&w), "{:?}[{}] = {}", window, i, w);
                assert_abs_diff_eq!(w, window.coefficient(size - 1 - i, size), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        for window in ALL {
            assert_eq!(window.coefficient(0, 1), 1.0);
            assert_eq!(window.coefficient(0, 0), 1.0);
        }
    }
}
