//! Parameter definitions with physical units and documented semantics.
//!
//! All tunables live here with:
//! - Units (samples, seconds, Hz, meters)
//! - Documented ranges and defaults
//! - Clamping or validation at construction

mod analyser;
mod capture;
mod reactive;

// Re-export all types
pub use analyser::{
    closest_power_of_two, AnalyserConfig, MAX_BAND_COUNT, MAX_MINIMUM_SAMPLE_COUNT,
    MAX_SAMPLE_COUNT, MIN_BAND_COUNT, MIN_SAMPLE_COUNT,
};
pub use capture::{CaptureConfig, PlaybackConfig, RecordingConfig};
pub use reactive::{EffectDriver, GraphLayout, GraphMapping, TransformMapping};
