//! Error types for the isotype engine.
//!
//! The glyph, graph and cluster paths never fail: missing inputs degrade to
//! documented defaults. These errors only come from the edges of the crate
//! (configuration, dataset loading, color parsing and request validation).

use thiserror::Error;

/// Errors raised while loading or validating engine inputs.
#[derive(Debug, Error)]
pub enum IsotypeError {
    /// YAML parsing or serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset contained no usable participant records.
    #[error("Dataset contains no participants")]
    EmptyDataset,

    /// A color string could not be parsed as `#rrggbb`.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Render state count does not line up with the subject list.
    #[error("Position count mismatch: {subjects} subjects but {positions} positions")]
    PositionMismatch { subjects: usize, positions: usize },
}
