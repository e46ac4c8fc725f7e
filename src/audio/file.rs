//! WAV file playback as a spectrum source.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::info;

use super::{PhysicalChannel, SpectrumEngine, SpectrumSource, WindowFunction};
use crate::error::Result;
use crate::params::PlaybackConfig;

/// Decoded WAV file played back by an externally driven clock
pub struct WavSource {
    left: Vec<f32>,
    right: Vec<f32>,
    sample_rate_hz: u32,

    /// Seconds since the source was created (includes the start delay)
    elapsed_s: f64,
    start_delay_s: f64,

    engine: SpectrumEngine,
    block: Vec<f32>,
}

impl WavSource {
    /// Load a WAV file; integer formats are normalised to [-1, 1]
    pub fn open(path: impl AsRef<Path>, config: &PlaybackConfig) -> Result<Self> {
        config.validate()?;

        let path = path.as_ref();
        let mut reader = WavReader::open(path)?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader.samples::<f32>().collect::<std::result::Result<_, _>>()?,
            SampleFormat::Int => {
                let full_scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|s| s as f32 / full_scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };

        let source = Self::from_interleaved(
            &interleaved,
            spec.channels as usize,
            spec.sample_rate,
            config,
        );

        info!(
            "Loaded {}: {} channels @ {}Hz, {:.2}s",
            path.display(),
            spec.channels,
            spec.sample_rate,
            source.duration_s()
        );

        Ok(source)
    }

    /// Build a source from interleaved samples already in memory
    pub fn from_interleaved(
        interleaved: &[f32],
        channels: usize,
        sample_rate_hz: u32,
        config: &PlaybackConfig,
    ) -> Self {
        let channels = channels.max(1);
        let frames = interleaved.len() / channels;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);

        for frame in interleaved.chunks_exact(channels) {
            left.push(frame[0]);
            right.push(if channels > 1 { frame[1] } else { frame[0] });
        }

        Self {
            left,
            right,
            sample_rate_hz,
            elapsed_s: 0.0,
            start_delay_s: config.start_delay_s.max(0.0) as f64,
            engine: SpectrumEngine::new(config.scaling),
            block: Vec::new(),
        }
    }

    /// Move the clock forward by `dt_s` seconds
    pub fn advance(&mut self, dt_s: f32) {
        self.elapsed_s += dt_s.max(0.0) as f64;
    }

    /// Playback position in seconds; negative while the start delay runs
    pub fn position_s(&self) -> f64 {
        self.elapsed_s - self.start_delay_s
    }

    pub fn duration_s(&self) -> f64 {
        if self.sample_rate_hz == 0 {
            return 0.0;
        }
        self.left.len() as f64 / self.sample_rate_hz as f64
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn start_delay_s(&self) -> f64 {
        self.start_delay_s
    }

    /// Delay elapsed and audio started
    pub fn is_playing(&self) -> bool {
        let position = self.position_s();
        position >= 0.0 && position < self.duration_s()
    }

    pub fn is_finished(&self) -> bool {
        self.position_s() >= self.duration_s()
    }
}

impl SpectrumSource for WavSource {
    fn spectrum(&mut self, channel: PhysicalChannel, window: WindowFunction, out: &mut [f32]) {
        if !self.is_playing() {
            out.fill(0.0);
            return;
        }

        let side = match channel {
            PhysicalChannel::Left => &self.left,
            PhysicalChannel::Right => &self.right,
        };
        let playhead = ((self.position_s() * self.sample_rate_hz as f64) as usize).min(side.len());
        let start = playhead.saturating_sub(out.len() * 2);

        self.block.clear();
        self.block.extend_from_slice(&side[start..playhead]);
        self.engine.compute(&self.block, window, out);
    }
}
