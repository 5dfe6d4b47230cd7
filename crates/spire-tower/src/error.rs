//! Tower generation errors.

use spire_config::ParamError;

use crate::pool::DecorationHandle;

/// Errors returned by [`TowerBuilder::build`](crate::TowerBuilder::build) and
/// the factories it drives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TowerError {
    /// A configuration value outside its closed set.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// Tier range is empty or starts at zero.
    #[error("invalid tower height range {min}..={max}: need 1 <= min <= max")]
    DegenerateHeightRange { min: u32, max: u32 },

    /// One axis of the node size range has `min > max`.
    #[error("invalid node {axis} range {min}..={max}: min exceeds max")]
    DegenerateSizeRange {
        axis: &'static str,
        min: f32,
        max: f32,
    },

    /// A node size bound is NaN or infinite.
    #[error("node {axis} range {min}..={max} must be finite")]
    NonFiniteSize {
        axis: &'static str,
        min: f32,
        max: f32,
    },

    /// Node sizes must be strictly positive.
    #[error("node {axis} must be positive, got {value}")]
    NonPositiveSize { axis: &'static str, value: f32 },

    /// A pool handle that does not refer to a live entry.
    #[error("decoration handle {0:?} is not in the pool")]
    StaleHandle(DecorationHandle),
}
