//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{info, warn};

use crate::audio::{Channel, ScalingStrategy, WindowFunction};
use crate::params::{AnalyserConfig, CaptureConfig, PlaybackConfig, RecordingConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "bandwave")]
#[command(about = "Real-time spectrum-to-band reduction", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub analyser: AnalyserArgs,

    /// Analysis ticks per second
    #[arg(long, global = true, value_name = "HZ", default_value = "60")]
    pub fps: f32,

    /// Channel to print: left, right, stereo (default)
    #[arg(long, global = true, value_name = "CHANNEL", default_value = "stereo")]
    pub channel: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse a WAV file offline
    File {
        /// WAV file to analyse
        path: PathBuf,

        /// Seconds of silence before playback starts
        #[arg(long, value_name = "SECONDS", default_value = "0")]
        delay: f32,
    },

    /// Analyse live input from a capture device
    Live {
        /// Capture duration
        #[arg(long, value_name = "SECONDS", default_value = "10")]
        seconds: f32,

        /// Use the first input device whose name contains this text
        #[arg(long, value_name = "NAME")]
        device: Option<String>,

        /// Record the captured audio to a WAV file
        #[arg(long, value_name = "PATH")]
        record: Option<PathBuf>,
    },
}

/// Band analysis settings shared by every command
#[derive(clap::Args, Debug)]
pub struct AnalyserArgs {
    /// Spectrum bins per channel (closest power of two in [64, 8192])
    #[arg(long, global = true, value_name = "N", default_value = "2048")]
    pub sample_count: usize,

    /// Output bands (rounded up to even, in [2, 16])
    #[arg(long, global = true, value_name = "N", default_value = "8")]
    pub band_count: usize,

    /// Samples each band must hold before extra samples are distributed [0, 500]
    #[arg(long, global = true, value_name = "N", default_value = "1")]
    pub minimum_sample_count: usize,

    /// Window: rectangular, triangle, hamming, hanning, blackman (default), blackman-harris
    #[arg(long, global = true, value_name = "WINDOW", default_value = "blackman")]
    pub window: String,

    /// Magnitude scaling: linear, sqrt, db (defaults per command)
    #[arg(long, global = true, value_name = "SCALING")]
    pub scaling: Option<String>,
}

impl Args {
    /// Analyser configuration, clamped to the supported ranges
    pub fn analyser_config(&self) -> AnalyserConfig {
        let args = &self.analyser;
        let config = AnalyserConfig::new(args.sample_count, args.band_count, args.minimum_sample_count)
            .with_window(parse_window(&args.window));

        info!(
            "Analyser: {} samples, {} bands, minimum {} per band, {:?} window",
            config.sample_count(),
            config.band_count(),
            config.minimum_sample_count(),
            config.window()
        );
        config
    }

    pub fn channel(&self) -> Channel {
        parse_channel(&self.channel)
    }

    /// Playback settings for the `file` command
    pub fn playback_config(&self) -> PlaybackConfig {
        let mut config = PlaybackConfig {
            tick_rate_hz: self.fps,
            ..PlaybackConfig::default()
        };
        if let Command::File { delay, .. } = self.command {
            config.start_delay_s = delay;
        }
        if let Some(ref scaling) = self.analyser.scaling {
            config.scaling = parse_scaling(scaling);
        }
        config
    }

    /// Capture settings for the `live` command
    pub fn capture_config(&self) -> CaptureConfig {
        let mut config = CaptureConfig {
            tick_rate_hz: self.fps,
            ..CaptureConfig::default()
        };
        if let Command::Live {
            seconds,
            ref device,
            ref record,
        } = self.command
        {
            config.duration_s = seconds;
            config.device_name = device.clone();
            config.recording = record.clone().map(RecordingConfig::new);
        }
        if let Some(ref scaling) = self.analyser.scaling {
            config.scaling = parse_scaling(scaling);
        }
        config
    }
}

/// Parse a window name, falling back to Blackman
pub fn parse_window(name: &str) -> WindowFunction {
    match name.to_lowercase().replace('_', "-").as_str() {
        "rectangular" | "rect" | "none" => WindowFunction::Rectangular,
        "triangle" => WindowFunction::Triangle,
        "hamming" => WindowFunction::Hamming,
        "hanning" | "hann" => WindowFunction::Hanning,
        "blackman" => WindowFunction::Blackman,
        "blackman-harris" | "blackmanharris" => WindowFunction::BlackmanHarris,
        other => {
            warn!("Unknown window '{}', using blackman", other);
            WindowFunction::Blackman
        }
    }
}

/// Parse a scaling name, falling back to linear
pub fn parse_scaling(name: &str) -> ScalingStrategy {
    match name.to_lowercase().as_str() {
        "linear" => ScalingStrategy::Linear,
        "sqrt" => ScalingStrategy::Sqrt,
        "db" | "decibel" => ScalingStrategy::Decibel,
        other => {
            warn!("Unknown scaling '{}', using linear", other);
            ScalingStrategy::Linear
        }
    }
}

/// Parse a channel name, falling back to stereo
pub fn parse_channel(name: &str) -> Channel {
    match name.to_lowercase().as_str() {
        "left" | "l" => Channel::Left,
        "right" | "r" => Channel::Right,
        "stereo" => Channel::Stereo,
        other => {
            warn!("Unknown channel '{}', using stereo", other);
            Channel::Stereo
        }
    }
}
