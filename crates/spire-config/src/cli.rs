//! Command-line argument parsing for the Spire generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::config::OutputFormat;
use crate::error::ParamError;
use crate::params::{BiomeType, ShapeKind, StackPattern};
use crate::presets::find_preset;

/// Spire command-line arguments.
///
/// CLI values override settings loaded from `config.ron`. A preset is applied
/// before the individual overrides, so `--preset "Mirage Tower" --pattern
/// clustered` keeps the preset's shape but stacks it in clusters.
#[derive(Parser, Debug, Default)]
#[command(name = "spire", about = "Procedural tower generator")]
pub struct CliArgs {
    /// Biome (forest, desert, ocean).
    #[arg(long)]
    pub biome: Option<BiomeType>,

    /// Node shape (cube, cylinder, sphere, cone, torus).
    #[arg(long)]
    pub shape: Option<ShapeKind>,

    /// Stack pattern (alternating, clustered, spiral, random).
    #[arg(long)]
    pub pattern: Option<StackPattern>,

    /// Minimum tier count.
    #[arg(long)]
    pub min_height: Option<u32>,

    /// Maximum tier count.
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Decoration density forwarded to the renderer.
    #[arg(long)]
    pub density: Option<f32>,

    /// Named tower preset (e.g. "Coral Spire").
    #[arg(long)]
    pub preset: Option<String>,

    /// Biome being faded out of.
    #[arg(long)]
    pub transition_from: Option<BiomeType>,

    /// Biome blend factor in [0, 1].
    #[arg(long)]
    pub transition_factor: Option<f32>,

    /// Fixed RNG seed for a reproducible tower.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of towers to generate back to back.
    #[arg(long)]
    pub count: Option<u32>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownPreset`] if `--preset` names no preset.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<(), ParamError> {
        if let Some(biome) = args.biome {
            self.scene.current_biome = biome;
        }
        if let Some(ref name) = args.preset {
            let preset = find_preset(name)?;
            self.scene.apply_preset(preset);
        }
        if let Some(shape) = args.shape {
            self.scene.node.shape = shape;
        }
        if let Some(pattern) = args.pattern {
            self.scene.tower.stack_pattern = pattern;
        }
        if let Some(min) = args.min_height {
            self.scene.tower.height.min = min;
        }
        if let Some(max) = args.max_height {
            self.scene.tower.height.max = max;
        }
        if let Some(density) = args.density {
            self.scene.tower.decoration_density = density;
        }
        if let Some(from) = args.transition_from {
            self.transition.from = Some(from);
        }
        if let Some(factor) = args.transition_factor {
            self.transition.factor = factor;
        }
        if let Some(seed) = args.seed {
            self.debug.seed = Some(seed);
        }
        if let Some(count) = args.count {
            self.output.regenerations = count;
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HeightRange;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            biome: Some(BiomeType::Ocean),
            pattern: Some(StackPattern::Clustered),
            max_height: Some(12),
            seed: Some(99),
            ..Default::default()
        };
        config.apply_cli_overrides(&args).unwrap();
        assert_eq!(config.scene.current_biome, BiomeType::Ocean);
        assert_eq!(config.scene.tower.stack_pattern, StackPattern::Clustered);
        assert_eq!(config.scene.tower.height.max, 12);
        assert_eq!(config.debug.seed, Some(99));
        // Non-overridden fields retain defaults
        assert_eq!(config.scene.tower.height.min, 5);
        assert_eq!(config.scene.node.shape, ShapeKind::Cube);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default()).unwrap();
        assert_eq!(config, original);
    }

    #[test]
    fn test_preset_then_individual_overrides() {
        let mut config = Config::default();
        let args = CliArgs {
            preset: Some("Mirage Tower".to_string()),
            pattern: Some(StackPattern::Clustered),
            ..Default::default()
        };
        config.apply_cli_overrides(&args).unwrap();
        assert_eq!(config.scene.node.shape, ShapeKind::Torus);
        assert_eq!(config.scene.tower.height, HeightRange { min: 7, max: 14 });
        assert_eq!(config.scene.tower.stack_pattern, StackPattern::Clustered);
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let mut config = Config::default();
        let args = CliArgs {
            preset: Some("Tower of Babel".to_string()),
            ..Default::default()
        };
        let err = config.apply_cli_overrides(&args).unwrap_err();
        assert_eq!(err, ParamError::UnknownPreset("Tower of Babel".to_string()));
    }

    #[test]
    fn test_parse_from_args() {
        let args = CliArgs::try_parse_from([
            "spire",
            "--biome",
            "desert",
            "--shape",
            "cone",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.biome, Some(BiomeType::Desert));
        assert_eq!(args.shape, Some(ShapeKind::Cone));
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        let result = CliArgs::try_parse_from(["spire", "--shape", "pyramid"]);
        assert!(result.is_err());
    }
}
