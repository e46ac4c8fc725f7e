//! Audio-reactive components.
//!
//! A component pulls one slice of analyser data each tick (raw samples or
//! bands, for one channel) and hands it to a [`Reaction`]. Reactions compute
//! plain values (transforms, bar geometry, named parameters) for a renderer
//! to apply.

mod drivers;
mod graph;
mod transform;

pub use drivers::ParameterDriver;
pub use graph::{Bar, GraphReaction};
pub use transform::{Transform, TransformMode, TransformReaction};

use crate::analyser::AudioAnalyser;
use crate::audio::Channel;

/// Something that responds to one frame of audio data
pub trait Reaction {
    fn react(&mut self, data: &[f32]);
}

impl<R: Reaction + ?Sized> Reaction for Box<R> {
    fn react(&mut self, data: &[f32]) {
        (**self).react(data);
    }
}

/// Which analyser data a component consumes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataTarget {
    /// Every `100 / resolution`-th sample, `resolution` per hundred, from
    /// `start` up to `end`
    RawSamples {
        start: usize,
        end: usize,
        resolution: usize,
    },

    /// The band frame
    #[default]
    FrequencyBands,
}

/// Binds a reaction to a data target and channel
#[derive(Debug, Clone)]
pub struct AudioReactive<R> {
    target: DataTarget,
    channel: Channel,
    audio_data: Vec<f32>,
    reaction: R,
}

impl<R: Reaction> AudioReactive<R> {
    pub fn new(reaction: R, target: DataTarget, channel: Channel) -> Self {
        Self {
            target,
            channel,
            audio_data: Vec::new(),
            reaction,
        }
    }

    /// Gather this tick's data from `analyser`, then react to it
    pub fn update(&mut self, analyser: &AudioAnalyser) {
        self.process_audio_data(analyser);
        self.reaction.react(&self.audio_data);
    }

    /// Data handed to the reaction on the last update
    pub fn audio_data(&self) -> &[f32] {
        &self.audio_data
    }

    pub fn reaction(&self) -> &R {
        &self.reaction
    }

    pub fn reaction_mut(&mut self) -> &mut R {
        &mut self.reaction
    }

    pub fn target(&self) -> &DataTarget {
        &self.target
    }

    pub fn set_target(&mut self, target: DataTarget) {
        self.target = target;
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn set_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    fn process_audio_data(&mut self, analyser: &AudioAnalyser) {
        match self.target {
            DataTarget::RawSamples {
                start,
                end,
                resolution,
            } => {
                let samples = analyser.samples(self.channel);
                pick_samples(samples, start, end, resolution, &mut self.audio_data);
            }
            DataTarget::FrequencyBands => {
                self.audio_data.clear();
                self.audio_data
                    .extend_from_slice(analyser.bands(self.channel));
            }
        }
    }
}

/// Down-sample `samples[start..end]` keeping `resolution` values per hundred
fn pick_samples(samples: &[f32], start: usize, end: usize, resolution: usize, out: &mut Vec<f32>) {
    let resolution = resolution.clamp(1, 100);
    let step = 100 / resolution;
    let count = end.saturating_sub(start) / 100 * resolution;

    out.clear();
    out.extend((0..count).map(|i| value_at(samples, start + i * step)));
}

/// Value at `index`, or 0 when out of range
fn value_at(data: &[f32], index: usize) -> f32 {
    data.get(index).copied().unwrap_or(0.0)
}

/// Value at `index` clamped to the last element, or 0 for empty data
fn clamped_value(data: &[f32], index: usize) -> f32 {
    match data.len() {
        0 => 0.0,
        len => data[index.min(len - 1)],
    }
}
