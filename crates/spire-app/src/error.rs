//! Errors surfaced by the `spire-app` binary.

use spire_config::{ConfigError, ParamError};
use spire_tower::TowerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no platform config directory; pass --config")]
    NoConfigDir,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error("tower generation failed: {0}")]
    Tower(#[from] TowerError),

    #[error("failed to write RON output: {0}")]
    Ron(#[from] ron::Error),

    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),
}
