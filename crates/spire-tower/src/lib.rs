//! Procedural tower generation: stacked nodes, biome decorations and the
//! pooled drawables that carry them between builds.

mod assets;
mod builder;
mod decoration;
mod error;
mod geometry;
mod node;
mod pool;

pub use assets::{DecorationAssets, decoration_geometry, decoration_surface};
pub use builder::{BiomeTransition, PlacedDecoration, PlacedNode, TIER_TAPER, Tower, TowerBuilder};
pub use decoration::{
    DECORATION_SCALE_RANGE, Decoration, DecorationPlacer, MAX_DECORATION_TILT,
    MAX_DECORATIONS_PER_NODE, pinned_height_fraction,
};
pub use error::TowerError;
pub use geometry::{Primitive, ShapeDescriptor, ShapePart, Transform};
pub use node::{Node, NodeFactory};
pub use pool::{DecorationHandle, DecorationPool, PooledDecoration};
