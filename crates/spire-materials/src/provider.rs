//! Material provider: lazily built per-biome surfaces and a bounded blend cache.

use hashbrown::HashMap;
use rand::Rng;
use spire_config::{BiomeType, MaterialOverrides};
use tracing::debug;

use crate::blending::{BlendKey, blend_surfaces};
use crate::material::{Color, SurfaceDescriptor};

/// Maximum number of blended surfaces kept before the blend cache is flushed.
pub const BLEND_CACHE_CAPACITY: usize = 100;

/// Base tint of each biome.
pub fn biome_color(biome: BiomeType) -> Color {
    match biome {
        BiomeType::Forest => Color::from_hex(0x228b22),
        BiomeType::Desert => Color::from_hex(0xdeb887),
        BiomeType::Ocean => Color::from_hex(0x4682b4),
    }
}

/// Biome-fixed `(roughness, metalness)`. These win over any base value.
pub fn biome_finish(biome: BiomeType) -> (f32, f32) {
    match biome {
        BiomeType::Forest => (0.8, 0.1),
        BiomeType::Desert => (0.9, 0.05),
        BiomeType::Ocean => (0.4, 0.3),
    }
}

/// Produces and caches surface descriptors per biome and per biome blend.
///
/// Both caches fill lazily on first request and empty only through
/// [`MaterialProvider::clear_cache`], or, for the blend cache, when it would
/// grow past [`BLEND_CACHE_CAPACITY`].
#[derive(Debug, Default)]
pub struct MaterialProvider {
    biome_surfaces: HashMap<BiomeType, SurfaceDescriptor>,
    blend_cache: HashMap<BlendKey, SurfaceDescriptor>,
    blend_clears: u64,
}

impl MaterialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the biome's base surface.
    ///
    /// `overrides` may change the opacity and environment intensity of the
    /// returned copy. Roughness and metalness are fixed per biome and ignore
    /// overrides. The cached entry never depends on `overrides`.
    pub fn surface_for(
        &mut self,
        biome: BiomeType,
        overrides: Option<&MaterialOverrides>,
    ) -> SurfaceDescriptor {
        let mut surface = self
            .biome_surfaces
            .entry(biome)
            .or_insert_with(|| build_biome_surface(biome))
            .clone();

        if let Some(overrides) = overrides {
            if let Some(opacity) = overrides.opacity {
                surface = surface.with_opacity(opacity);
            }
            if let Some(intensity) = overrides.env_map_intensity {
                surface.env_map_intensity = intensity.max(0.0);
            }
        }

        surface
    }

    /// Interpolates color, roughness and metalness from `from`'s base surface
    /// to `to`'s.
    ///
    /// `factor` is clamped to `[0, 1]` and rounded to two decimals; the result
    /// is cached under that rounded value. Blending a biome with itself
    /// returns its base surface unchanged.
    pub fn blend(&mut self, from: BiomeType, to: BiomeType, factor: f32) -> SurfaceDescriptor {
        let key = BlendKey::new(from, to, factor);
        if let Some(cached) = self.blend_cache.get(&key) {
            return cached.clone();
        }

        let from_surface = self.surface_for(from, None);
        let blended = if from == to {
            from_surface
        } else {
            let to_surface = self.surface_for(to, None);
            blend_surfaces(&from_surface, &to_surface, key.factor())
        };

        if self.blend_cache.len() >= BLEND_CACHE_CAPACITY {
            debug!(
                entries = self.blend_cache.len(),
                "Blend cache full, clearing"
            );
            self.blend_cache.clear();
            self.blend_clears += 1;
        }
        self.blend_cache.insert(key, blended.clone());

        blended
    }

    /// Copy of `base` with saturation and lightness each scaled by a random
    /// factor in `[0.9, 1.1)`.
    pub fn random_variation<R: Rng + ?Sized>(
        base: &SurfaceDescriptor,
        rng: &mut R,
    ) -> SurfaceDescriptor {
        let (hue, saturation, lightness) = base.color.to_hsl();
        let saturation = saturation * rng.random_range(0.9..1.1);
        let lightness = lightness * rng.random_range(0.9..1.1);

        SurfaceDescriptor {
            color: Color::from_hsl(hue, saturation, lightness),
            ..base.clone()
        }
    }

    /// Drops all cached base and blended surfaces.
    pub fn clear_cache(&mut self) {
        self.biome_surfaces.clear();
        self.blend_cache.clear();
    }

    /// Number of biomes with a cached base surface.
    pub fn cached_biome_count(&self) -> usize {
        self.biome_surfaces.len()
    }

    /// Number of cached blended surfaces.
    pub fn blend_cache_len(&self) -> usize {
        self.blend_cache.len()
    }

    /// How many times the blend cache was flushed for reaching capacity.
    pub fn blend_cache_clears(&self) -> u64 {
        self.blend_clears
    }
}

fn build_biome_surface(biome: BiomeType) -> SurfaceDescriptor {
    let (roughness, metalness) = biome_finish(biome);
    debug!(%biome, "Building base surface");

    SurfaceDescriptor {
        color: biome_color(biome),
        roughness,
        metalness,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assert_same_finish(a: &SurfaceDescriptor, b: &SurfaceDescriptor) {
        assert!((a.color.r - b.color.r).abs() < 1e-6);
        assert!((a.color.g - b.color.g).abs() < 1e-6);
        assert!((a.color.b - b.color.b).abs() < 1e-6);
        assert!((a.roughness - b.roughness).abs() < 1e-6);
        assert!((a.metalness - b.metalness).abs() < 1e-6);
    }

    #[test]
    fn test_biome_constants() {
        let mut provider = MaterialProvider::new();
        let forest = provider.surface_for(BiomeType::Forest, None);
        assert_eq!(forest.color.to_hex(), 0x228b22);
        assert_eq!((forest.roughness, forest.metalness), (0.8, 0.1));

        let desert = provider.surface_for(BiomeType::Desert, None);
        assert_eq!(desert.color.to_hex(), 0xdeb887);
        assert_eq!((desert.roughness, desert.metalness), (0.9, 0.05));

        let ocean = provider.surface_for(BiomeType::Ocean, None);
        assert_eq!(ocean.color.to_hex(), 0x4682b4);
        assert_eq!((ocean.roughness, ocean.metalness), (0.4, 0.3));
    }

    #[test]
    fn test_surface_is_cached_lazily() {
        let mut provider = MaterialProvider::new();
        assert_eq!(provider.cached_biome_count(), 0);
        provider.surface_for(BiomeType::Ocean, None);
        provider.surface_for(BiomeType::Ocean, None);
        assert_eq!(provider.cached_biome_count(), 1);
    }

    #[test]
    fn test_mutating_clone_leaves_cache_intact() {
        let mut provider = MaterialProvider::new();
        let mut copy = provider.surface_for(BiomeType::Forest, None);
        copy.roughness = 0.0;
        copy.color = Color::WHITE;

        let fresh = provider.surface_for(BiomeType::Forest, None);
        assert_eq!(fresh.roughness, 0.8);
        assert_eq!(fresh.color.to_hex(), 0x228b22);
    }

    #[test]
    fn test_biome_finish_wins_over_overrides() {
        let mut provider = MaterialProvider::new();
        let overrides = MaterialOverrides {
            roughness: Some(0.1),
            metalness: Some(0.9),
            opacity: Some(0.5),
            env_map_intensity: Some(2.0),
        };
        let surface = provider.surface_for(BiomeType::Desert, Some(&overrides));
        assert_eq!(surface.roughness, 0.9);
        assert_eq!(surface.metalness, 0.05);
        assert_eq!(surface.opacity, 0.5);
        assert!(surface.transparent);
        assert_eq!(surface.env_map_intensity, 2.0);

        // The cache is unaffected by the overrides
        let plain = provider.surface_for(BiomeType::Desert, None);
        assert_eq!(plain.opacity, 1.0);
        assert!(!plain.transparent);
    }

    #[test]
    fn test_same_biome_blend_is_identity() {
        let mut provider = MaterialProvider::new();
        for biome in BiomeType::ALL {
            let base = provider.surface_for(biome, None);
            for factor in [0.0, 0.17, 0.5, 0.99, 1.0] {
                assert_eq!(provider.blend(biome, biome, factor), base);
            }
        }
    }

    #[test]
    fn test_blend_endpoints() {
        let mut provider = MaterialProvider::new();
        for a in BiomeType::ALL {
            for b in BiomeType::ALL {
                if a == b {
                    continue;
                }
                let surface_a = provider.surface_for(a, None);
                let surface_b = provider.surface_for(b, None);
                assert_same_finish(&provider.blend(a, b, 0.0), &surface_a);
                assert_same_finish(&provider.blend(a, b, 1.0), &surface_b);
            }
        }
    }

    #[test]
    fn test_desert_ocean_midpoint_roughness() {
        let mut provider = MaterialProvider::new();
        let blended = provider.blend(BiomeType::Desert, BiomeType::Ocean, 0.5);
        assert!((blended.roughness - 0.65).abs() < 1e-6);
        assert!((blended.metalness - 0.175).abs() < 1e-6);
    }

    #[test]
    fn test_blend_is_cached_by_rounded_factor() {
        let mut provider = MaterialProvider::new();
        let a = provider.blend(BiomeType::Forest, BiomeType::Ocean, 0.301);
        let b = provider.blend(BiomeType::Forest, BiomeType::Ocean, 0.299);
        assert_eq!(a, b);
        assert_eq!(provider.blend_cache_len(), 1);
    }

    #[test]
    fn test_clear_then_rebuild_is_idempotent() {
        let mut provider = MaterialProvider::new();
        let before = provider.surface_for(BiomeType::Forest, None);
        provider.blend(BiomeType::Forest, BiomeType::Desert, 0.4);

        provider.clear_cache();
        assert_eq!(provider.cached_biome_count(), 0);
        assert_eq!(provider.blend_cache_len(), 0);

        let after = provider.surface_for(BiomeType::Forest, None);
        assert_eq!(before, after);
    }

    #[test]
    fn test_blend_cache_clears_once_at_101st_key() {
        let mut provider = MaterialProvider::new();

        // 101 distinct factors for one pair: 0.00 ..= 1.00
        for i in 0..100u8 {
            provider.blend(BiomeType::Forest, BiomeType::Ocean, f32::from(i) / 100.0);
        }
        assert_eq!(provider.blend_cache_len(), BLEND_CACHE_CAPACITY);
        assert_eq!(provider.blend_cache_clears(), 0);

        provider.blend(BiomeType::Forest, BiomeType::Ocean, 1.0);
        assert_eq!(provider.blend_cache_clears(), 1);
        assert_eq!(provider.blend_cache_len(), 1);
    }

    #[test]
    fn test_cache_hits_do_not_count_toward_capacity() {
        let mut provider = MaterialProvider::new();
        for _ in 0..500 {
            provider.blend(BiomeType::Desert, BiomeType::Forest, 0.25);
        }
        assert_eq!(provider.blend_cache_len(), 1);
        assert_eq!(provider.blend_cache_clears(), 0);
    }

    #[test]
    fn test_random_variation_keeps_finish() {
        let mut provider = MaterialProvider::new();
        let base = provider.surface_for(BiomeType::Ocean, None);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..20 {
            let varied = MaterialProvider::random_variation(&base, &mut rng);
            assert_eq!(varied.roughness, base.roughness);
            assert_eq!(varied.metalness, base.metalness);

            let (h0, s0, l0) = base.color.to_hsl();
            let (h1, s1, l1) = varied.color.to_hsl();
            assert!((h0 - h1).abs() < 1e-3);
            assert!(s1 >= s0 * 0.9 - 1e-3 && s1 <= (s0 * 1.1).min(1.0) + 1e-3);
            assert!(l1 >= l0 * 0.9 - 1e-3 && l1 <= l0 * 1.1 + 1e-3);
        }
    }
}
