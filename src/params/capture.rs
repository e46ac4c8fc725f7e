//! Audio source configuration: live capture, file playback and recording.

use std::path::PathBuf;
use std::time::Duration;

use crate::audio::ScalingStrategy;
use crate::error::{Error, Result};
use crate::params::analyser::MAX_SAMPLE_COUNT;

/// Live capture parameters
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Input device name (substring match); `None` selects the host default
    pub device_name: Option<String>,

    /// Samples of history kept per channel
    /// Must cover the largest transform (2 × 8192)
    pub history_len: usize,

    /// Magnitude post-scaling applied to every spectrum
    /// The desktop loopback path historically used `Sqrt`
    pub scaling: ScalingStrategy,

    /// Optional WAV recording of the captured stream
    pub recording: Option<RecordingConfig>,

    /// Analyser ticks per second while capturing
    pub tick_rate_hz: f32,

    /// How long to capture (seconds)
    pub duration_s: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_name: None,
            history_len: 2 * MAX_SAMPLE_COUNT,
            scaling: ScalingStrategy::Sqrt,
            recording: None,
            tick_rate_hz: 60.0,
            duration_s: 10.0,
        }
    }
}

impl CaptureConfig {
    /// Validate configuration (history must hold one full transform)
    pub fn validate(&self) -> Result<()> {
        if self.history_len < 2 * MAX_SAMPLE_COUNT {
            return Err(Error::InvalidConfig(format!(
                "history length must be at least {}, got {}",
                2 * MAX_SAMPLE_COUNT,
                self.history_len
            )));
        }
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "tick rate must be > 0, got {}",
                self.tick_rate_hz
            )));
        }
        if !(self.duration_s.is_finite() && self.duration_s >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "capture duration must be >= 0, got {}",
                self.duration_s
            )));
        }
        Ok(())
    }

    /// Wall-clock time between ticks
    pub fn tick_duration(&self) -> Result<Duration> {
        seconds_to_duration(1.0 / self.tick_rate_hz, "tick duration")
    }

    /// Wall-clock capture length
    pub fn run_duration(&self) -> Result<Duration> {
        seconds_to_duration(self.duration_s, "capture duration")
    }
}

fn seconds_to_duration(seconds: f32, what: &str) -> Result<Duration> {
    Duration::try_from_secs_f32(seconds)
        .map_err(|e| Error::InvalidConfig(format!("{} {}s: {}", what, seconds, e)))
}

/// Offline file playback parameters
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Analyser ticks per second of audio (frame rate)
    pub tick_rate_hz: f32,

    /// Silence before playback starts (seconds)
    pub start_delay_s: f32,

    /// Magnitude post-scaling applied to every spectrum
    pub scaling: ScalingStrategy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            start_delay_s: 0.0,
            scaling: ScalingStrategy::Linear,
        }
    }
}

impl PlaybackConfig {
    /// Duration of one tick (seconds)
    pub fn tick_duration_s(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "tick rate must be > 0, got {}",
                self.tick_rate_hz
            )));
        }
        if !(self.start_delay_s.is_finite() && self.start_delay_s >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "start delay must be >= 0, got {}",
                self.start_delay_s
            )));
        }
        Ok(())
    }
}

/// Recording of the captured stream to disk
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Output WAV path
    pub audio_path: PathBuf,
}

impl RecordingConfig {
    pub fn new(audio_path: impl Into<PathBuf>) -> Self {
        Self {
            audio_path: audio_path.into(),
        }
    }
}
