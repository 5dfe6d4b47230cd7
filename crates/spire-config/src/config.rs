//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::{BiomeType, SceneParameters};

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Parameters handed to the tower builder.
    pub scene: SceneParameters,
    /// Biome transition in progress, if any.
    pub transition: TransitionConfig,
    /// How generated towers are written out.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Biome cross-fade applied to node surfaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// Biome being faded out. `None` disables blending.
    pub from: Option<BiomeType>,
    /// Blend factor in `[0.0, 1.0]`; 0.0 disables blending.
    pub factor: f32,
}

/// Serialization format for generated towers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Ron,
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Pretty-print the serialized tower.
    pub pretty: bool,
    /// Number of towers to generate back to back (only the last is printed).
    pub regenerations: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to `log_dir`.
    pub file_logging: bool,
    /// Directory for JSON log files.
    pub log_dir: Option<PathBuf>,
    /// Fixed RNG seed. `None` draws from the unseeded thread RNG.
    pub seed: Option<u64>,
}

// --- Default implementations ---

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            from: None,
            factor: 0.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Ron,
            pretty: true,
            regenerations: 1,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: false,
            log_dir: None,
            seed: None,
        }
    }
}

// --- Load / Save / Reload ---

/// File name of the persisted configuration inside its directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

impl Config {
    /// Platform config directory for Spire (e.g. `~/.config/spire`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spire"))
    }

    /// Reads `config.ron` from `config_dir`, writing the defaults there first
    /// when the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let config = read_config(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes the config as pretty RON, creating `config_dir` if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), text).map_err(ConfigError::WriteError)
    }

    /// Re-reads the file and returns the new config only if it differs.
    ///
    /// Hosts that regenerate on parameter change call this and rebuild the
    /// tower when it returns `Some`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE_NAME))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk");
        Ok(Some(fresh))
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    ron::from_str(&text).map_err(ConfigError::ParseError)
}
