//! Transform reaction: drives location, rotation or scale per axis.

use glam::Vec3;

use super::{clamped_value, Reaction};
use crate::params::TransformMapping;

/// Which transform component the reaction drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformMode {
    /// Offset from the origin: `origin + value * strength`
    Location,
    /// Euler degrees accumulated every tick: `rotation += value * strength`
    Rotation,
    /// `clamp(value * strength + default, min + default, max + default)`
    #[default]
    Scale,
}

/// Position, rotation (Euler degrees) and scale of a driven object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation_deg: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_deg: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Maps three data values (one per axis) onto a transform
#[derive(Debug, Clone)]
pub struct TransformReaction {
    mode: TransformMode,
    mapping: TransformMapping,
    origin: Vec3,
    transform: Transform,
}

impl TransformReaction {
    pub fn new(mode: TransformMode, mapping: TransformMapping) -> Self {
        let transform = Transform {
            scale: mapping.default_scale,
            ..Transform::default()
        };
        Self {
            mode,
            mapping,
            origin: Vec3::ZERO,
            transform,
        }
    }

    /// Resting position for location mode
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self.transform.position = origin;
        self
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn mapping(&self) -> &TransformMapping {
        &self.mapping
    }

    fn axis_values(&self, data: &[f32]) -> Vec3 {
        let [x, y, z] = self.mapping.targets;
        Vec3::new(
            clamped_value(data, x),
            clamped_value(data, y),
            clamped_value(data, z),
        )
    }
}

impl Reaction for TransformReaction {
    fn react(&mut self, data: &[f32]) {
        let driven = self.axis_values(data) * self.mapping.strength;

        match self.mode {
            TransformMode::Location => {
                self.transform.position = self.origin + driven;
            }
            TransformMode::Rotation => {
                let rotation = self.transform.rotation_deg + driven;
                self.transform.rotation_deg = Vec3::new(
                    rotation.x.rem_euclid(360.0),
                    rotation.y.rem_euclid(360.0),
                    rotation.z.rem_euclid(360.0),
                );
            }
            TransformMode::Scale => {
                let default = self.mapping.default_scale;
                let scaled = driven + default;
                let mut scale = [0.0; 3];
                for (axis, out) in scale.iter_mut().enumerate() {
                    let (min, max) = self.mapping.scale_range[axis];
                    let low = min + default[axis];
                    let high = (max + default[axis]).max(low);
                    *out = scaled[axis].max(low).min(high);
                }
                self.transform.scale = Vec3::from_array(scale);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mapping(strength: Vec3) -> TransformMapping {
        TransformMapping {
            targets: [0, 1, 2],
            strength,
            default_scale: Vec3::ONE,
            scale_range: [(0.0, 2.0), (0.0, 2.0), (-0.5, 0.5)],
        }
    }

    #[test]
    fn test_scale_is_clamped_around_default() {
        let mut reaction = TransformReaction::new(TransformMode::Scale, mapping(Vec3::splat(10.0)));

        reaction.react(&[0.05, 1.0, -1.0]);

        let scale = reaction.transform().scale;
        assert_abs_diff_eq!(scale.x, 1.5, epsilon = 1e-6);
        assert_abs_diff_eq!(scale.y, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(scale.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_accumulates_and_wraps() {
        let mut reaction =
            TransformReaction::new(TransformMode::Rotation, mapping(Vec3::new(100.0, 0.0, 0.0)));

        for _ in 0..4 {
            reaction.react(&[1.0, 1.0, 1.0]);
        }

        assert_abs_diff_eq!(reaction.transform().rotation_deg.x, 40.0, epsilon = 1e-4);
        assert_eq!(reaction.transform().rotation_deg.y, 0.0);
    }

    #[test]
    fn test_location_offsets_from_origin() {
        let mut reaction = TransformReaction::new(TransformMode::Location, mapping(Vec3::splat(2.0)))
            .with_origin(Vec3::new(0.0, 5.0, 0.0));

        reaction.react(&[1.0, 0.5, 0.0]);

        assert_eq!(reaction.transform().position, Vec3::new(2.0, 6.0, 0.0));
    }

    #[test]
    fn test_targets_past_data_use_last_value() {
        let mut config = mapping(Vec3::ONE);
        config.targets = [0, 7, 99];
        let mut reaction = TransformReaction::new(TransformMode::Location, config);

        reaction.react(&[1.0, 3.0]);
        assert_eq!(reaction.transform().position, Vec3::new(1.0, 3.0, 3.0));

        reaction.react(&[]);
        assert_eq!(reaction.transform().position, Vec3::ZERO);
    }

    #[test]
    fn test_inverted_range_does_not_panic() {
        let mut config = mapping(Vec3::ONE);
        config.scale_range = [(1.0, -1.0); 3];
        let mut reaction = TransformReaction::new(TransformMode::Scale, config);

        reaction.react(&[5.0, 5.0, 5.0]);

        assert_eq!(reaction.transform().scale, Vec3::splat(2.0));
    }
}
