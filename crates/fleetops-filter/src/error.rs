//! Error types for the filter crate.
//!
//! Filtering itself never fails; these errors only surface when loading
//! configuration from serialized form.

use thiserror::Error;

/// Errors that can occur when loading filter configuration.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Configuration JSON could not be parsed.
    #[error("invalid filter settings JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Configuration YAML could not be parsed.
    #[error("invalid filter settings YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Result type for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
