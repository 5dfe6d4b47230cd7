//! Configuration for the Spire tower generator.
//!
//! Holds the scene parameter contract, the closed enumerations it is built
//! from, and the preset library. Settings persist to disk as RON files and
//! accept CLI overrides via clap.

mod cli;
mod config;
mod error;
mod params;

pub mod presets;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, OutputConfig, OutputFormat, TransitionConfig,
};
pub use error::{ConfigError, ParamError};
pub use params::{
    AnimationParameters, BiomeType, DecorationKind, HeightRange, MaterialOverrides, NodeParameters,
    NodeSize, SceneParameters, ShapeKind, SizeRange, StackPattern, TowerParameters,
};
pub use presets::{SizeVariation, TowerPreset};
