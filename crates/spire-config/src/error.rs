//! Configuration error types.

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}

/// A parameter value outside its closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("unknown biome: {0} (expected forest, desert or ocean)")]
    UnknownBiome(String),

    #[error("unknown node shape: {0} (expected cube, cylinder, sphere, cone or torus)")]
    UnknownShape(String),

    #[error("unknown stack pattern: {0} (expected alternating, clustered, spiral or random)")]
    UnknownStackPattern(String),

    #[error("unknown decoration type: {0}")]
    UnknownDecoration(String),

    #[error("unknown tower preset: {0}")]
    UnknownPreset(String),
}
