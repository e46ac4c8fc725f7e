//! Audio-reactive mapping parameters.

use glam::Vec3;

/// Mapping from analyser data to a transform (location, rotation or scale)
#[derive(Debug, Clone)]
pub struct TransformMapping {
    /// Data index driving each axis (x, y, z)
    pub targets: [usize; 3],

    /// Scale factor per axis: value → units (meters, degrees or scale)
    pub strength: Vec3,

    /// Resting scale the reaction is added to (scale mode only)
    pub default_scale: Vec3,

    /// Allowed offset from `default_scale` per axis as (min, max) (scale mode only)
    pub scale_range: [(f32, f32); 3],
}

impl Default for TransformMapping {
    fn default() -> Self {
        Self {
            targets: [0, 0, 0],
            strength: Vec3::ZERO,
            default_scale: Vec3::ONE,
            scale_range: [(0.0, 0.0); 3],
        }
    }
}

/// Arrangement of graph bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphLayout {
    /// Bars spread along the X axis, centred on the origin (length in meters)
    Line { length: f32 },

    /// Bars placed around the Y axis (radius in meters)
    Circle { radius: f32 },
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self::Line { length: 10.0 }
    }
}

/// Bar graph parameters
#[derive(Debug, Clone)]
pub struct GraphMapping {
    pub layout: GraphLayout,

    /// Scale of a bar at rest
    pub bar_scale: Vec3,

    /// Tallest extra height a bar may reach (meters)
    pub max_height: f32,

    /// Scale factor: value → height
    /// Spectrum magnitudes are small, hence the large default
    pub reaction_strength: f32,
}

impl Default for GraphMapping {
    fn default() -> Self {
        Self {
            layout: GraphLayout::default(),
            bar_scale: Vec3::ONE,
            max_height: 5.0,
            reaction_strength: 1000.0,
        }
    }
}

/// One named effect parameter driven by a band
#[derive(Debug, Clone, PartialEq)]
pub struct EffectDriver {
    pub name: String,
    pub target_band: usize,
    pub strength: f32,
}

impl EffectDriver {
    pub fn new(name: impl Into<String>, target_band: usize, strength: f32) -> Self {
        Self {
            name: name.into(),
            target_band,
            strength,
        }
    }
}
