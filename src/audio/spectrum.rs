//! Windowed magnitude spectrum over a time-domain block.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::WindowFunction;

/// Lowest level mapped by [`ScalingStrategy::Decibel`] (dBFS)
const DECIBEL_FLOOR: f32 = -90.0;

/// Post-scaling applied to raw magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalingStrategy {
    /// Amplitude-normalised magnitude
    #[default]
    Linear,
    /// Square root of the magnitude, lifts quiet bins
    Sqrt,
    /// Level in dBFS mapped from [-90, 0] onto [0, 1]
    Decibel,
}

impl ScalingStrategy {
    /// Scale one magnitude; always returns a finite, non-negative value
    pub fn apply(self, magnitude: f32) -> f32 {
        if !(magnitude.is_finite() && magnitude > 0.0) {
            return 0.0;
        }
        match self {
            ScalingStrategy::Linear => magnitude,
            ScalingStrategy::Sqrt => magnitude.sqrt(),
            ScalingStrategy::Decibel => {
                let db = 20.0 * magnitude.log10();
                ((db - DECIBEL_FLOOR) / -DECIBEL_FLOOR).clamp(0.0, 1.0)
            }
        }
    }
}

/// Reusable FFT state producing `n`-bin magnitude spectra from `2n` samples
pub struct SpectrumEngine {
    planner: FftPlanner<f32>,
    fft: Option<Arc<dyn Fft<f32>>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    window: Vec<f32>,
    window_kind: Option<WindowFunction>,
    window_gain: f32,
    scaling: ScalingStrategy,
}

impl SpectrumEngine {
    pub fn new(scaling: ScalingStrategy) -> Self {
        Self {
            planner: FftPlanner::new(),
            fft: None,
            buffer: Vec::new(),
            scratch: Vec::new(),
            window: Vec::new(),
            window_kind: None,
            window_gain: 0.0,
            scaling,
        }
    }

    pub fn scaling(&self) -> ScalingStrategy {
        self.scaling
    }

    pub fn set_scaling(&mut self, scaling: ScalingStrategy) {
        self.scaling = scaling;
    }

    /// Compute the magnitude spectrum of `signal` into `out`.
    ///
    /// The transform size is `2 * out.len()`. The most recent samples of
    /// `signal` are used; a short signal is zero-padded at the front.
    pub fn compute(&mut self, signal: &[f32], window: WindowFunction, out: &mut [f32]) {
        let size = out.len() * 2;
        if size == 0 {
            return;
        }
        self.prepare(size, window);

        let recent = &signal[signal.len().saturating_sub(size)..];
        let padding = size - recent.len();

        for (i, (slot, w)) in self.buffer.iter_mut().zip(&self.window).enumerate() {
            let sample = if i < padding { 0.0 } else { recent[i - padding] };
            *slot = Complex::new(sample * w, 0.0);
        }

        if let Some(fft) = &self.fft {
            fft.process_with_scratch(&mut self.buffer, &mut self.scratch);
        }

        // Coherent-gain normalisation: a bin-centred sine reads its amplitude
        let norm = if self.window_gain > 0.0 {
            2.0 / self.window_gain
        } else {
            0.0
        };
        for (bin, value) in out.iter_mut().zip(&self.buffer) {
            *bin = self.scaling.apply(value.norm() * norm);
        }
    }

    /// Re-plan the transform and window when the size or shape changed
    fn prepare(&mut self, size: usize, window: WindowFunction) {
        if self.buffer.len() != size || self.fft.is_none() {
            let fft = self.planner.plan_fft_forward(size);
            self.scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
            self.buffer = vec![Complex::new(0.0, 0.0); size];
            self.fft = Some(fft);
            self.window_kind = None;
        }
        if self.window_kind != Some(window) || self.window.len() != size {
            self.window.resize(size, 0.0);
            window.fill(&mut self.window);
            self.window_gain = self.window.iter().sum();
            self.window_kind = Some(window);
        }
    }
}

impl Default for SpectrumEngine {
    fn default() -> Self {
        Self::new(ScalingStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    fn sine(bin: usize, size: usize, amplitude: f32) -> Vec<f32> {
        (0..size)
            .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / size as f32).sin())
            .collect()
    }

    fn peak(spectrum: &[f32]) -> usize {
        spectrum
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
            .0
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let mut engine = SpectrumEngine::default();
        let mut out = vec![0.0; 512];
        let signal = sine(32, 1024, 0.5);

        engine.compute(&signal, WindowFunction::Blackman, &mut out);

        assert_eq!(peak(&out), 32);
        assert_abs_diff_eq!(out[32], 0.5, epsilon = 0.02);
    }

    #[test]
    fn test_silence_is_zero() {
        let mut engine = SpectrumEngine::new(ScalingStrategy::Decibel);
        let mut out = vec![1.0; 64];

        engine.compute(&[0.0; 128], WindowFunction::Hanning, &mut out);

        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_short_signal_is_padded() {
        let mut engine = SpectrumEngine::default();
        let mut out = vec![0.0; 256];

        engine.compute(&[0.25; 10], WindowFunction::Rectangular, &mut out);

        assert!(out.iter().all(|v| v.is_finite() && *v >= 0.0));
        assert!(out[0] > 0.0);
    }

    #[test]
    fn test_resizing_replans() {
        let mut engine = SpectrumEngine::default();
        let mut small = vec![0.0; 64];
        let mut large = vec![0.0; 1024];

        engine.compute(&sine(8, 128, 1.0), WindowFunction::Blackman, &mut small);
        engine.compute(&sine(100, 2048, 1.0), WindowFunction::Blackman, &mut large);

        assert_eq!(peak(&small), 8);
        assert_eq!(peak(&large), 100);
    }

    #[test]
    fn test_scaling_strategies() {
        assert_eq!(ScalingStrategy::Linear.apply(0.25), 0.25);
        assert_abs_diff_eq!(ScalingStrategy::Sqrt.apply(0.25), 0.5);
        assert_abs_diff_eq!(ScalingStrategy::Decibel.apply(1.0), 1.0);
        assert_eq!(ScalingStrategy::Decibel.apply(1e-6), 0.0);
        assert_abs_diff_eq!(ScalingStrategy::Decibel.apply(0.001), 1.0 / 3.0, epsilon = 1e-5);

        for strategy in [
            ScalingStrategy::Linear,
            ScalingStrategy::Sqrt,
            ScalingStrategy::Decibel,
        ] {
            assert_eq!(strategy.apply(f32::NAN), 0.0);
            assert_eq!(strategy.apply(f32::INFINITY), 0.0);
            assert_eq!(strategy.apply(-1.0), 0.0);
        }
    }
}
