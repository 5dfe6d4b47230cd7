//! Preset library: named tower archetypes per biome.
//!
//! Selecting a preset overwrites the tower-shaping fields of
//! [`SceneParameters`](crate::SceneParameters) in bulk via
//! [`SceneParameters::apply_preset`](crate::SceneParameters::apply_preset).

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::params::{BiomeType, HeightRange, MaterialOverrides, ShapeKind, StackPattern};

/// Relative per-axis size jitter a preset was authored with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SizeVariation {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// A named starting configuration for one biome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TowerPreset {
    pub name: String,
    pub description: String,
    pub biome: BiomeType,
    pub base_shape: ShapeKind,
    pub height_range: HeightRange,
    pub size_variation: SizeVariation,
    pub decoration_density: f32,
    pub stack_pattern: StackPattern,
    pub material: MaterialOverrides,
}

#[allow(clippy::too_many_arguments)]
fn preset(
    name: &str,
    description: &str,
    biome: BiomeType,
    base_shape: ShapeKind,
    (min, max): (u32, u32),
    (width, height, depth): (f32, f32, f32),
    decoration_density: f32,
    stack_pattern: StackPattern,
    material: MaterialOverrides,
) -> TowerPreset {
    TowerPreset {
        name: name.to_string(),
        description: description.to_string(),
        biome,
        base_shape,
        height_range: HeightRange { min, max },
        size_variation: SizeVariation {
            width,
            height,
            depth,
        },
        decoration_density,
        stack_pattern,
        material,
    }
}

fn surface(roughness: f32, metalness: f32, opacity: Option<f32>) -> MaterialOverrides {
    MaterialOverrides {
        roughness: Some(roughness),
        metalness: Some(metalness),
        opacity,
        env_map_intensity: None,
    }
}

static LIBRARY: LazyLock<Vec<TowerPreset>> = LazyLock::new(|| {
    use BiomeType::*;
    use ShapeKind::*;
    use StackPattern::*;

    vec![
        // Core archetypes
        preset(
            "Ancient Ruin",
            "Weathered stone tower reclaimed by nature",
            Forest,
            Cube,
            (4, 8),
            (0.3, 0.2, 0.3),
            1.5,
            Random,
            surface(0.9, 0.05, Some(1.0)),
        ),
        preset(
            "Overgrown Spire",
            "Tall tower with vegetation growing through cracks",
            Forest,
            Cylinder,
            (10, 15),
            (0.2, 0.3, 0.2),
            2.0,
            Alternating,
            surface(0.8, 0.1, None),
        ),
        preset(
            "Sandstone Pillar",
            "Wind-carved tower of ancient sandstone",
            Desert,
            Cube,
            (6, 12),
            (0.15, 0.2, 0.15),
            0.5,
            Alternating,
            surface(0.95, 0.02, None),
        ),
        preset(
            "Desert Temple",
            "Sacred structure with geometric patterns",
            Desert,
            Cylinder,
            (8, 14),
            (0.25, 0.2, 0.25),
            0.8,
            Spiral,
            surface(0.7, 0.1, None),
        ),
        preset(
            "Coral Spire",
            "Living tower of coral and sea life",
            Ocean,
            Cylinder,
            (5, 10),
            (0.25, 0.2, 0.25),
            1.8,
            Random,
            surface(0.4, 0.3, Some(0.9)),
        ),
        preset(
            "Sunken Ruin",
            "Ancient structure claimed by the sea",
            Ocean,
            Cube,
            (4, 8),
            (0.3, 0.25, 0.3),
            1.5,
            Alternating,
            surface(0.8, 0.1, Some(0.95)),
        ),
        // Unique archetypes
        preset(
            "Hanging Gardens",
            "Terraced tower with cascading vegetation",
            Forest,
            Cube,
            (8, 12),
            (0.4, 0.2, 0.4),
            2.5,
            Alternating,
            surface(0.85, 0.05, None),
        ),
        preset(
            "Mirage Tower",
            "Shimmering structure with ethereal properties",
            Desert,
            Torus,
            (7, 14),
            (0.3, 0.3, 0.3),
            0.6,
            Spiral,
            surface(0.2, 0.8, Some(0.7)),
        ),
        preset(
            "Crystal Grotto",
            "Crystalline formation with bioluminescent elements",
            Ocean,
            Sphere,
            (6, 10),
            (0.35, 0.35, 0.35),
            1.2,
            Random,
            surface(0.3, 0.6, Some(0.8)),
        ),
    ]
});

/// All presets, core archetypes first.
pub fn all_presets() -> &'static [TowerPreset] {
    &LIBRARY
}

/// Presets authored for `biome`, core archetypes first.
pub fn presets_for(biome: BiomeType) -> impl Iterator<Item = &'static TowerPreset> {
    LIBRARY.iter().filter(move |p| p.biome == biome)
}

/// The first preset of `biome`, selected when the editor switches biome.
pub fn default_preset(biome: BiomeType) -> &'static TowerPreset {
    // Every biome has at least one core archetype.
    presets_for(biome)
        .next()
        .unwrap_or(&LIBRARY[0])
}

/// Looks a preset up by its display name (case-insensitive).
///
/// # Errors
///
/// Returns [`ParamError::UnknownPreset`] if no preset has that name.
pub fn find_preset(name: &str) -> Result<&'static TowerPreset, ParamError> {
    LIBRARY
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ParamError::UnknownPreset(name.to_string()))
}
