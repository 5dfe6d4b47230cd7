//! Tower serialization for stdout.

use ron::ser::PrettyConfig;
use spire_config::OutputFormat;
use spire_tower::Tower;

use crate::error::AppError;

/// Serializes `tower` in the configured format.
pub fn render(tower: &Tower, format: OutputFormat, pretty: bool) -> Result<String, AppError> {
    let text = match (format, pretty) {
        (OutputFormat::Ron, true) => ron::ser::to_string_pretty(tower, PrettyConfig::new())?,
        (OutputFormat::Ron, false) => ron::to_string(tower)?,
        (OutputFormat::Json, true) => serde_json::to_string_pretty(tower)?,
        (OutputFormat::Json, false) => serde_json::to_string(tower)?,
    };
    Ok(text)
}
