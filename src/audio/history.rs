//! Bounded per-channel history of time-domain samples.

use std::collections::VecDeque;

use super::PhysicalChannel;

/// Most recent `capacity` samples for the left and right channels
#[derive(Debug, Clone)]
pub struct SampleHistory {
    left: VecDeque<f32>,
    right: VecDeque<f32>,
    capacity: usize,
}

impl SampleHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            left: VecDeque::with_capacity(capacity),
            right: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append interleaved frames with `channels` samples each.
    ///
    /// Mono input is duplicated to both sides; channels past the second are
    /// ignored. A trailing partial frame is dropped.
    pub fn push_interleaved(&mut self, data: &[f32], channels: usize) {
        if channels == 0 {
            return;
        }
        for frame in data.chunks_exact(channels) {
            let left = frame[0];
            let right = if channels > 1 { frame[1] } else { left };
            self.push_frame(left, right);
        }
    }

    /// Append a single stereo frame
    pub fn push_frame(&mut self, left: f32, right: f32) {
        if self.capacity == 0 {
            return;
        }
        if self.left.len() == self.capacity {
            self.left.pop_front();
            self.right.pop_front();
        }
        self.left.push_back(left);
        self.right.push_back(right);
    }

    /// Copy the latest `out.len()` samples of `channel` into `out`,
    /// zero-padding at the front when the history is shorter
    pub fn copy_latest(&self, channel: PhysicalChannel, out: &mut [f32]) {
        let side = match channel {
            PhysicalChannel::Left => &self.left,
            PhysicalChannel::Right => &self.right,
        };
        let available = side.len().min(out.len());
        let padding = out.len() - available;

        out[..padding].fill(0.0);
        for (slot, &sample) in out[padding..]
            .iter_mut()
            .zip(side.iter().skip(side.len() - available))
        {
            *slot = sample;
        }
    }

    /// Frames currently held
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}
