//! Error types for world construction and configuration loading.
//!
//! The simulation step itself never fails: numeric edge cases are handled
//! by clamping or exclusion. Everything that can go wrong is caught here,
//! before the first frame runs.

use thiserror::Error;

/// Errors raised while validating or loading a [`crate::config::Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A scalar parameter is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),

    /// The grid does not tile the world with cells of twice the interaction radius.
    #[error(
        "grid {axis} mismatch: {cells} cells over {extent} world units gives cell size {cell_size}, expected {expected}"
    )]
    GridMismatch {
        axis: &'static str,
        cells: usize,
        extent: f32,
        cell_size: f32,
        expected: f32,
    },

    /// The attraction matrix is not `G × G`.
    #[error("attraction matrix row {row} has {len} entries, expected {expected}")]
    MatrixShape { row: usize, len: usize, expected: usize },

    /// An attraction coefficient is outside `[-1, 1]` or not finite.
    #[error("attraction coefficient [{row}][{col}] = {value} is outside [-1, 1]")]
    Coefficient { row: usize, col: usize, value: f32 },

    /// Fewer group colors than color groups.
    #[error("palette has {colors} colors but {groups} color groups are configured")]
    Palette { colors: usize, groups: usize },

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON for [`crate::config::Config`].
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
