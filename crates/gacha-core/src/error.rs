//! Error types for draws and config loading

use thiserror::Error;

use crate::rarity::RarityTag;

/// Draw failure
///
/// All variants are configuration errors. Callers should treat them as
/// fatal for the request; the engine never retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    /// Version not present in the registry
    #[error("Unknown gacha version: {0}")]
    UnknownVersion(String),

    /// No categories, or total weight is not positive
    #[error("Category set is empty or has no weight")]
    EmptyCategorySet,

    /// Selected category has no items
    #[error("Category {0} has no items")]
    EmptyCategoryItems(RarityTag),
}

/// Config loading failure
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// File extension is not .json, .yaml or .yml
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Config parsed but breaks a rule or limit
    #[error("Invalid config for version {version}: {reason}")]
    Validation { version: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(version: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            version: version.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for draw operations
pub type DrawOutcome<T> = Result<T, DrawError>;
