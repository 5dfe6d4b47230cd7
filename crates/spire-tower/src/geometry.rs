//! Shape descriptors and transforms handed to the rendering collaborator.
//!
//! The generator never builds vertex data. A [`ShapeDescriptor`] names the
//! primitive(s) a drawable is made of plus the fixed local transform baked
//! into each part; the renderer turns that into real geometry.

use glam::Vec3;
use serde::Serialize;

/// A parametric primitive, dimensioned in local units.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        /// Swept angle in radians; `TAU` is a closed ring.
        arc: f32,
    },
    Circle {
        radius: f32,
        segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Icosahedron {
        radius: f32,
        detail: u32,
    },
}

/// One primitive with the transform baked into its vertices.
///
/// Order of application: scale, rotate (XYZ Euler), translate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapePart {
    pub primitive: Primitive,
    pub offset: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
}

impl ShapePart {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            offset: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }
}

/// Geometry of one drawable: a single primitive or a merged compound.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeDescriptor {
    pub parts: Vec<ShapePart>,
}

impl ShapeDescriptor {
    pub fn single(primitive: Primitive) -> Self {
        Self {
            parts: vec![ShapePart::new(primitive)],
        }
    }

    /// Merges several descriptors into one drawable.
    pub fn merged(shapes: impl IntoIterator<Item = ShapeDescriptor>) -> Self {
        Self {
            parts: shapes.into_iter().flat_map(|s| s.parts).collect(),
        }
    }

    /// Moves every part by `offset`.
    pub fn translated(mut self, offset: Vec3) -> Self {
        for part in &mut self.parts {
            part.offset += offset;
        }
        self
    }

    /// Scales every part (and its offset) component-wise.
    pub fn scaled(mut self, scale: Vec3) -> Self {
        for part in &mut self.parts {
            part.scale *= scale;
            part.offset *= scale;
        }
        self
    }

    /// Rotates every part about the Z axis.
    ///
    /// Only valid before any translation has been applied.
    pub fn rotated_z(mut self, angle: f32) -> Self {
        for part in &mut self.parts {
            part.rotation.z += angle;
        }
        self
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}

/// Placement of a drawable relative to its parent.
///
/// `rotation` is an XYZ Euler triple in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Rotation about the vertical axis.
    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Primitive {
        Primitive::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }

    #[test]
    fn test_single_part_identity() {
        let shape = ShapeDescriptor::single(unit_box());
        assert_eq!(shape.part_count(), 1);
        assert_eq!(shape.parts[0].offset, Vec3::ZERO);
        assert_eq!(shape.parts[0].scale, Vec3::ONE);
    }

    #[test]
    fn test_scale_then_translate() {
        let shape = ShapeDescriptor::single(unit_box())
            .scaled(Vec3::new(1.0, 0.5, 1.0))
            .translated(Vec3::new(0.0, 0.2, 0.0));
        assert_eq!(shape.parts[0].scale, Vec3::new(1.0, 0.5, 1.0));
        assert_eq!(shape.parts[0].offset, Vec3::new(0.0, 0.2, 0.0));
    }

    #[test]
    fn test_scaling_moves_existing_offset() {
        let shape = ShapeDescriptor::single(unit_box())
            .translated(Vec3::new(0.0, 0.2, 0.0))
            .scaled(Vec3::new(1.0, 1.5, 1.0));
        assert!((shape.parts[0].offset.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_merged_keeps_parts_in_order() {
        let a = ShapeDescriptor::single(unit_box());
        let b = ShapeDescriptor::single(Primitive::Plane {
            width: 1.0,
            height: 2.0,
        });
        let merged = ShapeDescriptor::merged([a, b]);
        assert_eq!(merged.part_count(), 2);
        assert!(matches!(merged.parts[1].primitive, Primitive::Plane { .. }));
    }

    #[test]
    fn test_transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t, Transform::IDENTITY);
        assert_eq!(t.yaw(), 0.0);
    }
}
