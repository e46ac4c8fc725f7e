//! Spectrum sampler: one spectrum fetch per physical channel per tick.

use log::debug;

use super::{Channel, PhysicalChannel, SpectrumSource};
use crate::params::AnalyserConfig;

/// Holds the left, right and stereo sample frames for the current tick
#[derive(Debug, Clone)]
pub struct SpectrumSampler {
    left: Vec<f32>,
    right: Vec<f32>,
    stereo: Vec<f32>,
}

impl SpectrumSampler {
    pub fn new(sample_count: usize) -> Self {
        Self {
            left: vec![0.0; sample_count],
            right: vec![0.0; sample_count],
            stereo: vec![0.0; sample_count],
        }
    }

    /// Fetch this tick's frames from `source`.
    ///
    /// Buffers are reallocated first if the configured sample count changed.
    /// The source is queried exactly once per physical channel; stereo is the
    /// elementwise mean of left and right.
    pub fn sample<S>(&mut self, source: &mut S, config: &AnalyserConfig)
    where
        S: SpectrumSource + ?Sized,
    {
        self.resize(config.sample_count());

        source.spectrum(PhysicalChannel::Left, config.window(), &mut self.left);
        source.spectrum(PhysicalChannel::Right, config.window(), &mut self.right);

        for ((stereo, &left), &right) in self.stereo.iter_mut().zip(&self.left).zip(&self.right) {
            *stereo = (left + right) * 0.5;
        }
    }

    /// Most recent frame for `channel`
    pub fn samples(&self, channel: Channel) -> &[f32] {
        match channel {
            Channel::Left => &self.left,
            Channel::Right => &self.right,
            Channel::Stereo => &self.stereo,
        }
    }

    /// Current frame length
    pub fn sample_count(&self) -> usize {
        self.stereo.len()
    }

    fn resize(&mut self, sample_count: usize) {
        if self.stereo.len() == sample_count {
            return;
        }
        debug!(
            "reallocating sample buffers: {} -> {}",
            self.stereo.len(),
            sample_count
        );
        self.left = vec![0.0; sample_count];
        self.right = vec![0.0; sample_count];
        self.stereo = vec![0.0; sample_count];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Silence, WindowFunction};

    /// Fills left with 1.0 and right with 3.0, counting calls
    #[derive(Default)]
    struct ConstantSource {
        calls: Vec<(PhysicalChannel, usize)>,
    }

    impl SpectrumSource for ConstantSource {
        fn spectrum(&mut self, channel: PhysicalChannel, _window: WindowFunction, out: &mut [f32]) {
            self.calls.push((channel, out.len()));
            let value = match channel {
                PhysicalChannel::Left => 1.0,
                PhysicalChannel::Right => 3.0,
            };
            out.fill(value);
        }
    }

    #[test]
    fn test_stereo_is_mean_of_left_and_right() {
        let config = AnalyserConfig::new(64, 2, 0);
        let mut sampler = SpectrumSampler::new(64);
        let mut source = ConstantSource::default();

        sampler.sample(&mut source, &config);

        assert!(sampler.samples(Channel::Left).iter().all(|&v| v == 1.0));
        assert!(sampler.samples(Channel::Right).iter().all(|&v| v == 3.0));
        assert!(sampler.samples(Channel::Stereo).iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_source_queried_once_per_physical_channel() {
        let config = AnalyserConfig::default();
        let mut sampler = SpectrumSampler::new(config.sample_count());
        let mut source = ConstantSource::default();

        sampler.sample(&mut source, &config);

        assert_eq!(
            source.calls,
            vec![
                (PhysicalChannel::Left, config.sample_count()),
                (PhysicalChannel::Right, config.sample_count()),
            ]
        );
    }

    #[test]
    fn test_reallocates_before_fetch_on_config_change() {
        let mut sampler = SpectrumSampler::new(2048);
        let mut source = ConstantSource::default();

        let config = AnalyserConfig::default().with_sample_count(512);
        sampler.sample(&mut source, &config);

        assert_eq!(sampler.sample_count(), 512);
        for channel in [Channel::Left, Channel::Right, Channel::Stereo] {
            assert_eq!(sampler.samples(channel).len(), 512);
        }
        assert!(source.calls.iter().all(|&(_, len)| len == 512));
    }

    #[test]
    fn test_silence_yields_zeros() {
        let config = AnalyserConfig::default();
        let mut sampler = SpectrumSampler::new(config.sample_count());

        sampler.sample(&mut Silence, &config);

        assert!(sampler.samples(Channel::Stereo).iter().all(|&v| v == 0.0));
    }
}
