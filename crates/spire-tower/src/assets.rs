//! Shared decoration assets: geometry per kind, surface per kind and biome.

use std::f32::consts::{FRAC_PI_4, PI};
use std::rc::Rc;

use glam::Vec3;
use hashbrown::HashMap;
use spire_config::{BiomeType, DecorationKind};
use spire_materials::{Color, MaterialProvider, SurfaceDescriptor};
use tracing::trace;

use crate::geometry::{Primitive, ShapeDescriptor};

/// Green used by foliage-like decorations.
pub const FOLIAGE_COLOR: u32 = 0x2d5a27;
pub const CRYSTAL_COLOR: u32 = 0xb19cd9;
pub const CORAL_COLOR: u32 = 0xff7f50;

/// Lazily built decoration geometry and surfaces.
///
/// Geometry is shared between every drawable of a kind. Surfaces are
/// handed out as clones.
#[derive(Debug, Default)]
pub struct DecorationAssets {
    geometries: HashMap<DecorationKind, Rc<ShapeDescriptor>>,
    surfaces: HashMap<(DecorationKind, BiomeType), SurfaceDescriptor>,
}

impl DecorationAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&mut self, kind: DecorationKind) -> Rc<ShapeDescriptor> {
        Rc::clone(
            self.geometries
                .entry(kind)
                .or_insert_with(|| Rc::new(decoration_geometry(kind))),
        )
    }

    pub fn surface(
        &mut self,
        kind: DecorationKind,
        biome: BiomeType,
        materials: &mut MaterialProvider,
    ) -> SurfaceDescriptor {
        self.surfaces
            .entry((kind, biome))
            .or_insert_with(|| {
                trace!(%kind, %biome, "Building decoration surface");
                decoration_surface(kind, biome, materials)
            })
            .clone()
    }

    pub fn clear(&mut self) {
        self.geometries.clear();
        self.surfaces.clear();
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }
}

/// Local geometry of a decoration kind, before placement.
pub fn decoration_geometry(kind: DecorationKind) -> ShapeDescriptor {
    let y = |v: f32| Vec3::new(0.0, v, 0.0);
    let squash = |v: f32| Vec3::new(1.0, v, 1.0);

    match kind {
        DecorationKind::Vine => {
            ShapeDescriptor::single(cylinder(0.02, 0.02, 1.0, 4)).translated(y(-0.5))
        }
        DecorationKind::Moss => ShapeDescriptor::single(sphere(0.15, 8, 8)).scaled(squash(0.3)),
        DecorationKind::Leaf => ShapeDescriptor::single(Primitive::Circle {
            radius: 0.2,
            segments: 5,
        }),
        DecorationKind::Branch => {
            ShapeDescriptor::single(cylinder(0.05, 0.03, 1.0, 5)).rotated_z(FRAC_PI_4)
        }
        DecorationKind::Mushroom => ShapeDescriptor::merged([
            ShapeDescriptor::single(sphere(0.2, 8, 8))
                .scaled(squash(0.5))
                .translated(y(0.2)),
            ShapeDescriptor::single(cylinder(0.05, 0.08, 0.4, 8)),
        ]),
        DecorationKind::Cactus => {
            ShapeDescriptor::single(cylinder(0.1, 0.1, 0.8, 8)).translated(y(0.4))
        }
        DecorationKind::Rock => ShapeDescriptor::single(Primitive::Icosahedron {
            radius: 0.2,
            detail: 0,
        })
        .scaled(squash(0.7)),
        DecorationKind::Crystal => ShapeDescriptor::single(cone(0.15, 0.4, 6)),
        DecorationKind::Coral => ShapeDescriptor::merged([
            ShapeDescriptor::single(cylinder(0.05, 0.1, 0.5, 8)),
            ShapeDescriptor::single(sphere(0.2, 8, 4))
                .scaled(squash(1.5))
                .translated(y(0.25)),
        ]),
        DecorationKind::Seaweed => ShapeDescriptor::single(Primitive::Plane {
            width: 0.2,
            height: 0.8,
        })
        .translated(y(0.4)),
        DecorationKind::Barnacle => ShapeDescriptor::single(cone(0.1, 0.15, 8)),
        DecorationKind::Shell => ShapeDescriptor::single(Primitive::Torus {
            radius: 0.15,
            tube: 0.05,
            radial_segments: 8,
            tubular_segments: 12,
            arc: PI,
        }),
        DecorationKind::Anemone => {
            ShapeDescriptor::single(cylinder(0.15, 0.1, 0.3, 16)).translated(y(0.15))
        }
        DecorationKind::Tumbleweed => ShapeDescriptor::single(Primitive::Box {
            width: 0.1,
            height: 0.1,
            depth: 0.1,
        }),
    }
}

/// Surface of a decoration kind in a biome.
///
/// Foliage, crystal and coral have their own finish; everything else wears
/// the biome's base surface.
pub fn decoration_surface(
    kind: DecorationKind,
    biome: BiomeType,
    materials: &mut MaterialProvider,
) -> SurfaceDescriptor {
    match kind {
        DecorationKind::Vine | DecorationKind::Leaf | DecorationKind::Seaweed => SurfaceDescriptor {
            color: Color::from_hex(FOLIAGE_COLOR),
            roughness: 1.0,
            metalness: 0.0,
            double_sided: true,
            ..Default::default()
        }
        .with_opacity(0.9),
        DecorationKind::Crystal => SurfaceDescriptor {
            color: Color::from_hex(CRYSTAL_COLOR),
            roughness: 0.2,
            metalness: 0.9,
            ..Default::default()
        }
        .with_opacity(0.8),
        DecorationKind::Coral => SurfaceDescriptor {
            color: Color::from_hex(CORAL_COLOR),
            roughness: 0.7,
            metalness: 0.2,
            ..Default::default()
        },
        _ => materials.surface_for(biome, None),
    }
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Primitive {
    Primitive::Cylinder {
        radius_top,
        radius_bottom,
        height,
        radial_segments,
    }
}

fn cone(radius: f32, height: f32, radial_segments: u32) -> Primitive {
    Primitive::Cone {
        radius,
        height,
        radial_segments,
    }
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Primitive {
    Primitive::Sphere {
        radius,
        width_segments,
        height_segments,
    }
}
