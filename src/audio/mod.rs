//! Audio input and spectrum sampling.
//!
//! Spectrum sources wrap whatever produces audio (a WAV file, a live input
//! device) behind one call that fills a magnitude spectrum for a physical
//! channel. The sampler turns two such calls per tick into left, right and
//! stereo frames.

mod file;
mod history;
mod recorder;
mod sampler;
mod spectrum;
#[cfg(feature = "capture")]
mod system;
mod window;

// Re-export public types
pub use file::WavSource;
pub use history::SampleHistory;
pub use recorder::WavRecorder;
pub use sampler::SpectrumSampler;
pub use spectrum::{ScalingStrategy, SpectrumEngine};
#[cfg(feature = "capture")]
pub use system::CaptureSource;
pub use window::{hann_window, WindowFunction};

/// Logical channel exposed to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    Left,
    Right,
    /// Elementwise mean of left and right
    #[default]
    Stereo,
}

/// Channel actually read from the audio source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalChannel {
    Left,
    Right,
}

/// Host primitive producing a magnitude spectrum.
///
/// Implementations fill all of `out` (one value per frequency bin) and must
/// write zeros rather than fail when no audio is available.
pub trait SpectrumSource {
    fn spectrum(&mut self, channel: PhysicalChannel, window: WindowFunction, out: &mut [f32]);
}

/// Source that never has audio
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl SpectrumSource for Silence {
    fn spectrum(&mut self, _channel: PhysicalChannel, _window: WindowFunction, out: &mut [f32]) {
        out.fill(0.0);
    }
}

impl<S: SpectrumSource + ?Sized> SpectrumSource for &mut S {
    fn spectrum(&mut self, channel: PhysicalChannel, window: WindowFunction, out: &mut [f32]) {
        (**self).spectrum(channel, window, out);
    }
}

impl<S: SpectrumSource + ?Sized> SpectrumSource for Box<S> {
    fn spectrum(&mut self, channel: PhysicalChannel, window: WindowFunction, out: &mut [f32]) {
        (**self).spectrum(channel, window, out);
    }
}
