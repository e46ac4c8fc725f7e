//! Per-tick audio analyser: samples a spectrum source and reduces it to bands.
//!
//! Data flows one way each tick:
//! source → left/right samples → stereo samples → bands per channel.

use crate::audio::{Channel, SpectrumSampler, SpectrumSource};
use crate::bands::{BandAllocation, BandReducer};
use crate::params::AnalyserConfig;

/// Analyser holding the most recent sample and band frames for every channel
#[derive(Debug)]
pub struct AudioAnalyser {
    config: AnalyserConfig,
    sampler: SpectrumSampler,
    reducer: BandReducer,
    left_bands: Vec<f32>,
    right_bands: Vec<f32>,
    stereo_bands: Vec<f32>,
}

impl AudioAnalyser {
    pub fn new(config: AnalyserConfig) -> Self {
        Self {
            config,
            sampler: SpectrumSampler::new(config.sample_count()),
            reducer: BandReducer::new(),
            left_bands: vec![0.0; config.band_count()],
            right_bands: vec![0.0; config.band_count()],
            stereo_bands: vec![0.0; config.band_count()],
        }
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Buffers are resized at the top of the next [`update`](Self::update);
    /// frames served until then keep their previous length.
    pub fn set_config(&mut self, config: AnalyserConfig) {
        self.config = config;
    }

    /// Run one tick: fetch spectra from `source` and recompute all bands
    pub fn update<S>(&mut self, source: &mut S)
    where
        S: SpectrumSource + ?Sized,
    {
        self.sampler.sample(source, &self.config);

        self.reducer.reduce(
            &self.config,
            self.sampler.samples(Channel::Left),
            &mut self.left_bands,
        );
        self.reducer.reduce(
            &self.config,
            self.sampler.samples(Channel::Right),
            &mut self.right_bands,
        );

        // Stereo bands from the other bands, cheaper than a third reduction
        if self.stereo_bands.len() != self.config.band_count() {
            self.stereo_bands.resize(self.config.band_count(), 0.0);
        }
        for ((stereo, &left), &right) in self
            .stereo_bands
            .iter_mut()
            .zip(&self.left_bands)
            .zip(&self.right_bands)
        {
            *stereo = (left + right) * 0.5;
        }
    }

    /// Raw spectrum samples of the last tick for `channel`
    pub fn samples(&self, channel: Channel) -> &[f32] {
        self.sampler.samples(channel)
    }

    /// Band magnitudes of the last tick for `channel`
    pub fn bands(&self, channel: Channel) -> &[f32] {
        match channel {
            Channel::Left => &self.left_bands,
            Channel::Right => &self.right_bands,
            Channel::Stereo => &self.stereo_bands,
        }
    }

    /// Sample allocation for the current configuration
    pub fn allocation(&mut self) -> &BandAllocation {
        self.reducer.allocation(&self.config)
    }
}

impl Default for AudioAnalyser {
    fn default() -> Self {
        Self::new(AnalyserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{PhysicalChannel, Silence, WindowFunction};
    use approx::assert_abs_diff_eq;

    /// Left is a ramp 1..=n, right is constant, so bands are predictable
    struct RampSource {
        fetches: usize,
    }

    impl SpectrumSource for RampSource {
        fn spectrum(&mut self, channel: PhysicalChannel, _window: WindowFunction, out: &mut [f32]) {
            self.fetches += 1;
            for (i, v) in out.iter_mut().enumerate() {
                *v = match channel {
                    PhysicalChannel::Left => (i + 1) as f32,
                    PhysicalChannel::Right => 2.0,
                };
            }
        }
    }

    #[test]
    fn test_initial_frames_are_sized_and_zero() {
        let analyser = AudioAnalyser::default();
        for channel in [Channel::Left, Channel::Right, Channel::Stereo] {
            assert_eq!(analyser.samples(channel).len(), 2048);
            assert_eq!(analyser.bands(channel), &[0.0; 8]);
        }
    }

    #[test]
    fn test_update_reduces_every_channel() {
        let config = AnalyserConfig::new(64, 2, 0);
        let mut analyser = AudioAnalyser::new(config);
        let mut source = RampSource { fetches: 0 };

        analyser.update(&mut source);

        // 64 samples over 2 bands, floor 0: weights [2, 4] -> [21, 43]
        assert_eq!(analyser.allocation().counts(), &[21, 43]);

        let left = analyser.bands(Channel::Left);
        assert_abs_diff_eq!(left[0], 11.0);
        assert_abs_diff_eq!(left[1], 43.0);

        assert_eq!(analyser.bands(Channel::Right), &[2.0, 2.0]);

        let stereo = analyser.bands(Channel::Stereo);
        assert_abs_diff_eq!(stereo[0], 6.5);
        assert_abs_diff_eq!(stereo[1], 22.5);
    }

    #[test]
    fn test_two_fetches_per_tick() {
        let mut analyser = AudioAnalyser::default();
        let mut source = RampSource { fetches: 0 };

        analyser.update(&mut source);
        analyser.update(&mut source);

        assert_eq!(source.fetches, 4);
    }

    #[test]
    fn test_config_change_reallocates_on_next_update() {
        let mut analyser = AudioAnalyser::default();
        let mut source = RampSource { fetches: 0 };
        analyser.update(&mut source);

        analyser.set_config(AnalyserConfig::new(256, 4, 3));
        analyser.update(&mut source);

        for channel in [Channel::Left, Channel::Right, Channel::Stereo] {
            assert_eq!(analyser.samples(channel).len(), 256);
            assert_eq!(analyser.bands(channel).len(), 4);
        }
        assert_eq!(analyser.allocation().total(), 256);
    }

    #[test]
    fn test_silence_gives_finite_zero_bands() {
        let mut analyser = AudioAnalyser::new(AnalyserConfig::new(64, 16, 500));
        analyser.update(&mut Silence);

        for channel in [Channel::Left, Channel::Right, Channel::Stereo] {
            assert!(analyser.bands(channel).iter().all(|&b| b == 0.0));
        }
    }

    #[test]
    fn test_update_is_repeatable() {
        let mut analyser = AudioAnalyser::new(AnalyserConfig::new(512, 6, 20));
        let mut source = RampSource { fetches: 0 };

        analyser.update(&mut source);
        let first = analyser.bands(Channel::Stereo).to_vec();
        analyser.update(&mut source);

        assert_eq!(first, analyser.bands(Channel::Stereo));
    }
}
