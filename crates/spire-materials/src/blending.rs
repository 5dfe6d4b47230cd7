//! Biome blending: interpolation of surface descriptors and blend cache keys.

use spire_config::BiomeType;

use crate::SurfaceDescriptor;

/// Linear interpolation written so both endpoints are exact.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Interpolates color, roughness and metalness from `from` to `to`.
///
/// The remaining fields take [`SurfaceDescriptor::default`] values; a blended
/// surface is a fresh material, not a modified copy of either endpoint.
pub fn blend_surfaces(
    from: &SurfaceDescriptor,
    to: &SurfaceDescriptor,
    factor: f32,
) -> SurfaceDescriptor {
    SurfaceDescriptor {
        color: from.color.lerp(to.color, factor),
        roughness: lerp(from.roughness, to.roughness, factor),
        metalness: lerp(from.metalness, to.metalness, factor),
        ..Default::default()
    }
}

/// Cache key for a blended surface: the biome pair plus the factor rounded
/// to two decimals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlendKey {
    pub from: BiomeType,
    pub to: BiomeType,
    /// Factor in hundredths, `0..=100`.
    pub hundredths: u8,
}

impl BlendKey {
    /// Quantizes `factor` (clamped to `[0, 1]`) to two decimals.
    pub fn new(from: BiomeType, to: BiomeType, factor: f32) -> Self {
        let hundredths = (factor.clamp(0.0, 1.0) * 100.0).round() as u8;
        Self {
            from,
            to,
            hundredths,
        }
    }

    /// The quantized factor this key stands for.
    pub fn factor(self) -> f32 {
        f32::from(self.hundredths) / 100.0
    }
}
