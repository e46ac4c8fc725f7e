//! Error types for the edges of the system (files, devices, parameters).
//!
//! The reduction core never fails; it degrades numerically instead.

use thiserror::Error;

/// Errors raised while opening audio sources or validating parameters
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter set failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// WAV decoding or encoding failed
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    /// No capture device matched the request
    #[error("no audio input device found")]
    NoInputDevice,

    /// The capture backend refused to build or start a stream
    #[error("capture error: {0}")]
    Capture(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "capture")]
impl From<cpal::BuildStreamError> for Error {
    fn from(e: cpal::BuildStreamError) -> Self {
        Error::Capture(format!("failed to build input stream: {}", e))
    }
}

#[cfg(feature = "capture")]
impl From<cpal::PlayStreamError> for Error {
    fn from(e: cpal::PlayStreamError) -> Self {
        Error::Capture(format!("failed to start input stream: {}", e))
    }
}

#[cfg(feature = "capture")]
impl From<cpal::DefaultStreamConfigError> for Error {
    fn from(e: cpal::DefaultStreamConfigError) -> Self {
        Error::Capture(format!("failed to get input config: {}", e))
    }
}

#[cfg(feature = "capture")]
impl From<cpal::DevicesError> for Error {
    fn from(e: cpal::DevicesError) -> Self {
        Error::Capture(format!("failed to enumerate devices: {}", e))
    }
}
