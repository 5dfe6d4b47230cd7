//! Decoration placement: a few biome-appropriate ornaments per node.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::Serialize;
use spire_config::{BiomeType, DecorationKind};

use crate::node::Node;

/// Upper bound on decorations per node; at least one is always placed.
pub const MAX_DECORATIONS_PER_NODE: u32 = 3;
/// Uniform scale variation range.
pub const DECORATION_SCALE_RANGE: (f32, f32) = (0.8, 1.2);
/// Largest X/Z tilt in radians, either direction.
pub const MAX_DECORATION_TILT: f32 = 0.25;

/// A decoration descriptor, positioned relative to its node's center.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub local_position: Vec3,
    pub scale: f32,
    /// XYZ Euler rotation in radians.
    pub rotation: Vec3,
}

/// Produces decoration descriptors for nodes.
///
/// Pure descriptor generation: drawables come from
/// [`DecorationPool`](crate::DecorationPool).
#[derive(Clone, Copy, Debug, Default)]
pub struct DecorationPlacer;

impl DecorationPlacer {
    pub fn new() -> Self {
        Self
    }

    /// Between 1 and [`MAX_DECORATIONS_PER_NODE`] decorations drawn from
    /// `biome`'s vocabulary, scattered within the node's bounds.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        node: &Node,
        biome: BiomeType,
        rng: &mut R,
    ) -> Vec<Decoration> {
        let vocabulary = biome.decoration_vocabulary();
        let count = rng.random_range(1..=MAX_DECORATIONS_PER_NODE);

        (0..count)
            .map(|_| {
                let kind = vocabulary[rng.random_range(0..vocabulary.len())];
                Decoration {
                    kind,
                    local_position: place(kind, node, rng),
                    scale: rng.random_range(DECORATION_SCALE_RANGE.0..=DECORATION_SCALE_RANGE.1),
                    rotation: Vec3::new(
                        rng.random_range(-MAX_DECORATION_TILT..=MAX_DECORATION_TILT),
                        rng.random_range(0.0..TAU),
                        rng.random_range(-MAX_DECORATION_TILT..=MAX_DECORATION_TILT),
                    ),
                }
            })
            .collect()
    }
}

/// Fixed height for kinds that hang from or sit on a node, as a fraction of
/// the node's height.
pub fn pinned_height_fraction(kind: DecorationKind) -> Option<f32> {
    match kind {
        DecorationKind::Vine | DecorationKind::Seaweed => Some(0.3),
        DecorationKind::Moss | DecorationKind::Mushroom => Some(-0.4),
        DecorationKind::Rock | DecorationKind::Crystal => Some(-0.3),
        _ => None,
    }
}

fn place<R: Rng + ?Sized>(kind: DecorationKind, node: &Node, rng: &mut R) -> Vec3 {
    let half = Vec3::new(node.size.width, node.size.height, node.size.depth) / 2.0;
    let x = rng.random_range(-half.x..=half.x);
    let z = rng.random_range(-half.z..=half.z);
    let y = match pinned_height_fraction(kind) {
        Some(fraction) => node.size.height * fraction,
        None => rng.random_range(-half.y..=half.y),
    };
    Vec3::new(x, y, z)
}
