//! Bandwave library - real-time spectrum-to-band reduction
//!
//! Spectrum sources feed an analyser that keeps left, right and stereo
//! sample frames and reduces each to a small set of frequency bands.
//! Audio-reactive components turn those frames into plain values.

pub mod analyser;
pub mod audio;
pub mod bands;
pub mod cli;
pub mod error;
pub mod params;
pub mod reactive;

pub use analyser::AudioAnalyser;
pub use error::{Error, Result};
