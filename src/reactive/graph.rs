//! Bar graph reaction: one bar per data value, laid out on a line or circle.

use glam::{Quat, Vec3};

use super::Reaction;
use crate::params::{GraphLayout, GraphMapping};

/// One graph bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub position: Vec3,
    /// Yaw in degrees (circle layout faces bars outwards)
    pub rotation_deg: f32,
    pub scale: Vec3,
}

/// Bar graph driven by the full data frame
#[derive(Debug, Clone)]
pub struct GraphReaction {
    mapping: GraphMapping,
    origin: Vec3,
    bars: Vec<Bar>,
}

impl GraphReaction {
    pub fn new(mapping: GraphMapping) -> Self {
        Self {
            mapping,
            origin: Vec3::ZERO,
            bars: Vec::new(),
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self.bars.clear();
        self
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn mapping(&self) -> &GraphMapping {
        &self.mapping
    }

    /// Change the layout; bars are rebuilt on the next reaction
    pub fn set_mapping(&mut self, mapping: GraphMapping) {
        self.mapping = mapping;
        self.bars.clear();
    }

    fn layout_bars(&mut self, count: usize) {
        self.bars.clear();
        if count == 0 {
            return;
        }

        let base = self.mapping.bar_scale;
        match self.mapping.layout {
            GraphLayout::Line { length } => {
                let step = length / count as f32;
                let start = self.origin.x - length / 2.0;
                self.bars.extend((0..count).map(|i| Bar {
                    position: Vec3::new(start + step * i as f32, self.origin.y, self.origin.z),
                    rotation_deg: 0.0,
                    scale: base,
                }));
            }
            GraphLayout::Circle { radius } => {
                let step_deg = 360.0 / count as f32;
                self.bars.extend((0..count).map(|i| {
                    let yaw = step_deg * i as f32;
                    let rotation = Quat::from_rotation_y(yaw.to_radians());
                    Bar {
                        position: self.origin + rotation * (Vec3::Z * radius),
                        rotation_deg: yaw,
                        scale: base,
                    }
                }));
            }
        }
    }
}

impl Reaction for GraphReaction {
    fn react(&mut self, data: &[f32]) {
        if self.bars.len() != data.len() {
            self.layout_bars(data.len());
        }

        let max_height = self.mapping.max_height.max(0.0);
        for (bar, &value) in self.bars.iter_mut().zip(data) {
            let height = (value * self.mapping.reaction_strength)
                .max(0.0)
                .min(max_height);
            // NaN from a bad frame collapses to rest height
            let height = if height.is_finite() { height } else { 0.0 };
            bar.scale = self.mapping.bar_scale + Vec3::Y * height;
        }
    }
}
