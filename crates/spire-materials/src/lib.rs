//! Surface system: color and surface descriptors, per-biome base surfaces,
//! and cross-biome blending.

mod blending;
mod material;
mod provider;

pub use blending::{BlendKey, blend_surfaces, lerp};
pub use material::{Color, SurfaceDescriptor};
pub use provider::{BLEND_CACHE_CAPACITY, MaterialProvider, biome_color, biome_finish};
