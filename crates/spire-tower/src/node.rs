//! Structural nodes: one solid shape per tower tier.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::Vec3;
use serde::Serialize;
use spire_config::{BiomeType, MaterialOverrides, NodeSize, ShapeKind};
use spire_materials::{MaterialProvider, SurfaceDescriptor};

use crate::error::TowerError;
use crate::geometry::{Primitive, ShapeDescriptor};

/// Radial segments for cylinders and cones.
pub const NODE_RADIAL_SEGMENTS: u32 = 32;
/// Width and height segments for spheres.
pub const NODE_SPHERE_SEGMENTS: u32 = 32;
/// Torus tube segments.
pub const NODE_TORUS_RADIAL_SEGMENTS: u32 = 16;
/// Torus ring segments.
pub const NODE_TORUS_TUBULAR_SEGMENTS: u32 = 32;

/// A structural drawable with its generation metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub shape: ShapeKind,
    pub size: NodeSize,
    pub biome: BiomeType,
    pub surface: SurfaceDescriptor,
    /// Free-form tags attached by whoever places the node.
    pub user_data: BTreeMap<String, String>,
}

impl Node {
    /// Geometry for this node's shape and size.
    pub fn shape_descriptor(&self) -> ShapeDescriptor {
        NodeFactory::shape_descriptor(self.shape, self.size)
    }

    /// Local offset lifting the drawable so its base sits at the node origin.
    pub fn drawable_offset(&self) -> Vec3 {
        Vec3::new(0.0, self.size.height / 2.0, 0.0)
    }
}

/// Builds [`Node`]s from a shape, a size and the biome surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeFactory;

impl NodeFactory {
    pub fn new() -> Self {
        Self
    }

    /// Builds a node dressed in the biome surface from `materials`.
    pub fn generate_node(
        &self,
        materials: &mut MaterialProvider,
        shape: ShapeKind,
        size: NodeSize,
        biome: BiomeType,
        overrides: Option<&MaterialOverrides>,
    ) -> Node {
        Node {
            shape,
            size,
            biome,
            surface: materials.surface_for(biome, overrides),
            user_data: BTreeMap::new(),
        }
    }

    /// Like [`NodeFactory::generate_node`] with the shape given by name.
    ///
    /// Fails with [`ParamError::UnknownShape`](spire_config::ParamError) for
    /// names outside the shape set.
    pub fn generate_named(
        &self,
        materials: &mut MaterialProvider,
        shape: &str,
        size: NodeSize,
        biome: BiomeType,
        overrides: Option<&MaterialOverrides>,
    ) -> Result<Node, TowerError> {
        let shape: ShapeKind = shape.parse()?;
        Ok(self.generate_node(materials, shape, size, biome, overrides))
    }

    /// Primitive dimensions for a shape.
    ///
    /// Cylinders, cones and the torus ring take their radius from `width / 2`.
    /// A sphere fits the smallest axis; the torus tube is `height / 4`.
    pub fn shape_descriptor(shape: ShapeKind, size: NodeSize) -> ShapeDescriptor {
        let radius = size.width / 2.0;
        let primitive = match shape {
            ShapeKind::Cube => Primitive::Box {
                width: size.width,
                height: size.height,
                depth: size.depth,
            },
            ShapeKind::Cylinder => Primitive::Cylinder {
                radius_top: radius,
                radius_bottom: radius,
                height: size.height,
                radial_segments: NODE_RADIAL_SEGMENTS,
            },
            ShapeKind::Sphere => Primitive::Sphere {
                radius: size.width.min(size.height).min(size.depth) / 2.0,
                width_segments: NODE_SPHERE_SEGMENTS,
                height_segments: NODE_SPHERE_SEGMENTS,
            },
            ShapeKind::Cone => Primitive::Cone {
                radius,
                height: size.height,
                radial_segments: NODE_RADIAL_SEGMENTS,
            },
            ShapeKind::Torus => Primitive::Torus {
                radius,
                tube: size.height / 4.0,
                radial_segments: NODE_TORUS_RADIAL_SEGMENTS,
                tubular_segments: NODE_TORUS_TUBULAR_SEGMENTS,
                arc: TAU,
            },
        };
        ShapeDescriptor::single(primitive)
    }
}
