//! Scene parameters: the configuration contract consumed by the tower generator.
//!
//! The closed enumerations ([`BiomeType`], [`ShapeKind`], [`StackPattern`],
//! [`DecorationKind`]) parse from their lowercase names; anything outside the
//! set is rejected with a [`ParamError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::presets::TowerPreset;

// ---------------------------------------------------------------------------
// BiomeType
// ---------------------------------------------------------------------------

/// Environment theme: selects decoration vocabulary and base surface tint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomeType {
    #[default]
    Forest,
    Desert,
    Ocean,
}

impl BiomeType {
    /// Every biome, in declaration order.
    pub const ALL: [BiomeType; 3] = [BiomeType::Forest, BiomeType::Desert, BiomeType::Ocean];

    /// Lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            BiomeType::Forest => "forest",
            BiomeType::Desert => "desert",
            BiomeType::Ocean => "ocean",
        }
    }

    /// Decoration types that may grow on nodes of this biome.
    pub fn decoration_vocabulary(self) -> &'static [DecorationKind] {
        use DecorationKind::*;
        match self {
            BiomeType::Forest => &[Vine, Moss, Leaf, Branch, Mushroom],
            BiomeType::Desert => &[Cactus, Rock, Moss, Tumbleweed, Crystal],
            BiomeType::Ocean => &[Coral, Seaweed, Barnacle, Shell, Anemone],
        }
    }
}

impl fmt::Display for BiomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiomeType {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BiomeType::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParamError::UnknownBiome(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ShapeKind
// ---------------------------------------------------------------------------

/// Primitive shape of a tower node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Cube,
    Cylinder,
    Sphere,
    Cone,
    Torus,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Cube,
        ShapeKind::Cylinder,
        ShapeKind::Sphere,
        ShapeKind::Cone,
        ShapeKind::Torus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cone => "cone",
            ShapeKind::Torus => "torus",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParamError::UnknownShape(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// StackPattern
// ---------------------------------------------------------------------------

/// Rule governing each tier's in-plane rotation/offset.
///
/// Only [`StackPattern::Alternating`] and [`StackPattern::Clustered`] carry a
/// transform; `Spiral` and `Random` stack tiers straight up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackPattern {
    #[default]
    Alternating,
    Clustered,
    Spiral,
    Random,
}

impl StackPattern {
    pub const ALL: [StackPattern; 4] = [
        StackPattern::Alternating,
        StackPattern::Clustered,
        StackPattern::Spiral,
        StackPattern::Random,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StackPattern::Alternating => "alternating",
            StackPattern::Clustered => "clustered",
            StackPattern::Spiral => "spiral",
            StackPattern::Random => "random",
        }
    }
}

impl fmt::Display for StackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StackPattern {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StackPattern::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParamError::UnknownStackPattern(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// DecorationKind
// ---------------------------------------------------------------------------

/// Decoration types across all biome vocabularies. `Moss` is shared by forest
/// and desert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
    Vine,
    Moss,
    Leaf,
    Branch,
    Mushroom,
    Cactus,
    Rock,
    Tumbleweed,
    Crystal,
    Coral,
    Seaweed,
    Barnacle,
    Shell,
    Anemone,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 14] = [
        DecorationKind::Vine,
        DecorationKind::Moss,
        DecorationKind::Leaf,
        DecorationKind::Branch,
        DecorationKind::Mushroom,
        DecorationKind::Cactus,
        DecorationKind::Rock,
        DecorationKind::Tumbleweed,
        DecorationKind::Crystal,
        DecorationKind::Coral,
        DecorationKind::Seaweed,
        DecorationKind::Barnacle,
        DecorationKind::Shell,
        DecorationKind::Anemone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DecorationKind::Vine => "vine",
            DecorationKind::Moss => "moss",
            DecorationKind::Leaf => "leaf",
            DecorationKind::Branch => "branch",
            DecorationKind::Mushroom => "mushroom",
            DecorationKind::Cactus => "cactus",
            DecorationKind::Rock => "rock",
            DecorationKind::Tumbleweed => "tumbleweed",
            DecorationKind::Crystal => "crystal",
            DecorationKind::Coral => "coral",
            DecorationKind::Seaweed => "seaweed",
            DecorationKind::Barnacle => "barnacle",
            DecorationKind::Shell => "shell",
            DecorationKind::Anemone => "anemone",
        }
    }
}

impl fmt::Display for DecorationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecorationKind {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DecorationKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParamError::UnknownDecoration(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Parameter structs
// ---------------------------------------------------------------------------

/// Extent of a node along each axis, in world units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NodeSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl NodeSize {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Multiplies every axis by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(
            self.width * factor,
            self.height * factor,
            self.depth * factor,
        )
    }
}

/// Per-axis sampling range for node sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SizeRange {
    pub min: NodeSize,
    pub max: NodeSize,
}

/// Inclusive tier-count range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeightRange {
    pub min: u32,
    pub max: u32,
}

/// Node shape and size parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeParameters {
    pub shape: ShapeKind,
    pub size: SizeRange,
}

/// Tower-wide stacking parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TowerParameters {
    /// Tier count range.
    pub height: HeightRange,
    pub stack_pattern: StackPattern,
    /// Decoration amount requested by the editor. Forwarded to the renderer.
    pub decoration_density: f32,
}

/// Animation settings for the rendering collaborator. Not read by the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationParameters {
    pub enabled: bool,
    pub speed: f32,
    pub wind_strength: f32,
}

/// Optional surface overrides. `None` leaves the biome default in place.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialOverrides {
    pub roughness: Option<f32>,
    pub metalness: Option<f32>,
    pub opacity: Option<f32>,
    pub env_map_intensity: Option<f32>,
}

impl MaterialOverrides {
    /// Copies every field `other` sets onto `self`.
    pub fn merge(&mut self, other: &MaterialOverrides) {
        if other.roughness.is_some() {
            self.roughness = other.roughness;
        }
        if other.metalness.is_some() {
            self.metalness = other.metalness;
        }
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
        if other.env_map_intensity.is_some() {
            self.env_map_intensity = other.env_map_intensity;
        }
    }
}

/// Complete generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneParameters {
    pub current_biome: BiomeType,
    pub node: NodeParameters,
    pub tower: TowerParameters,
    pub animation: AnimationParameters,
    pub material: MaterialOverrides,
}

impl Default for NodeParameters {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Cube,
            size: SizeRange {
                min: NodeSize::new(1.0, 1.0, 1.0),
                max: NodeSize::new(2.0, 2.0, 2.0),
            },
        }
    }
}

impl Default for TowerParameters {
    fn default() -> Self {
        Self {
            height: HeightRange { min: 5, max: 10 },
            stack_pattern: StackPattern::Alternating,
            decoration_density: 1.0,
        }
    }
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            wind_strength: 1.0,
        }
    }
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            current_biome: BiomeType::Forest,
            node: NodeParameters::default(),
            tower: TowerParameters::default(),
            animation: AnimationParameters::default(),
            material: MaterialOverrides {
                roughness: Some(0.7),
                metalness: Some(0.1),
                opacity: Some(1.0),
                env_map_intensity: Some(1.0),
            },
        }
    }
}

impl SceneParameters {
    /// Overwrites shape, tier range, stack pattern, decoration density and the
    /// material overrides the preset sets. Biome and size range are untouched.
    pub fn apply_preset(&mut self, preset: &TowerPreset) {
        self.node.shape = preset.base_shape;
        self.tower.height = preset.height_range;
        self.tower.stack_pattern = preset.stack_pattern;
        self.tower.decoration_density = preset.decoration_density;
        self.material.merge(&preset.material);
    }

    /// Restores the defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::find_preset;

    #[test]
    fn test_enums_parse_case_insensitively() {
        assert_eq!("Forest".parse::<BiomeType>().unwrap(), BiomeType::Forest);
        assert_eq!("TORUS".parse::<ShapeKind>().unwrap(), ShapeKind::Torus);
        assert_eq!(
            "spiral".parse::<StackPattern>().unwrap(),
            StackPattern::Spiral
        );
        assert_eq!(
            "seaweed".parse::<DecorationKind>().unwrap(),
            DecorationKind::Seaweed
        );
    }

    #[test]
    fn test_unknown_enum_values_rejected() {
        assert!(matches!(
            "tundra".parse::<BiomeType>(),
            Err(ParamError::UnknownBiome(name)) if name == "tundra"
        ));
        assert!(matches!(
            "pyramid".parse::<ShapeKind>(),
            Err(ParamError::UnknownShape(_))
        ));
        assert!(matches!(
            "zigzag".parse::<StackPattern>(),
            Err(ParamError::UnknownStackPattern(_))
        ));
    }

    #[test]
    fn test_display_matches_parse() {
        for shape in ShapeKind::ALL {
            assert_eq!(shape.to_string().parse::<ShapeKind>().unwrap(), shape);
        }
        for kind in DecorationKind::ALL {
            assert_eq!(kind.to_string().parse::<DecorationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_vocabularies_have_five_entries() {
        for biome in BiomeType::ALL {
            assert_eq!(biome.decoration_vocabulary().len(), 5);
        }
        assert!(
            BiomeType::Forest
                .decoration_vocabulary()
                .contains(&DecorationKind::Moss)
        );
        assert!(
            BiomeType::Desert
                .decoration_vocabulary()
                .contains(&DecorationKind::Moss)
        );
        assert!(
            !BiomeType::Ocean
                .decoration_vocabulary()
                .contains(&DecorationKind::Moss)
        );
    }

    #[test]
    fn test_defaults() {
        let params = SceneParameters::default();
        assert_eq!(params.current_biome, BiomeType::Forest);
        assert_eq!(params.node.shape, ShapeKind::Cube);
        assert_eq!(params.tower.height, HeightRange { min: 5, max: 10 });
        assert_eq!(params.tower.stack_pattern, StackPattern::Alternating);
        assert_eq!(params.material.roughness, Some(0.7));
        assert!(params.animation.enabled);
    }

    #[test]
    fn test_apply_preset_overwrites_tower_fields() {
        let mut params = SceneParameters::default();
        let mirage = find_preset("Mirage Tower").unwrap();
        params.apply_preset(mirage);

        assert_eq!(params.node.shape, ShapeKind::Torus);
        assert_eq!(params.tower.height, HeightRange { min: 7, max: 14 });
        assert_eq!(params.tower.stack_pattern, StackPattern::Spiral);
        assert_eq!(params.tower.decoration_density, 0.6);
        assert_eq!(params.material.metalness, Some(0.8));
        assert_eq!(params.material.opacity, Some(0.7));
        // Untouched by presets
        assert_eq!(params.current_biome, BiomeType::Forest);
        assert_eq!(params.material.env_map_intensity, Some(1.0));
    }

    #[test]
    fn test_apply_preset_keeps_unset_material_fields() {
        let mut params = SceneParameters::default();
        let spire = find_preset("Overgrown Spire").unwrap();
        params.apply_preset(spire);
        assert_eq!(params.material.roughness, Some(0.8));
        assert_eq!(params.material.opacity, Some(1.0));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut params = SceneParameters::default();
        params.current_biome = BiomeType::Ocean;
        params.tower.height.max = 20;
        params.reset();
        assert_eq!(params, SceneParameters::default());
    }

    #[test]
    fn test_node_size_scaled() {
        let size = NodeSize::new(2.0, 4.0, 1.0).scaled(0.5);
        assert_eq!(size, NodeSize::new(1.0, 2.0, 0.5));
    }
}
