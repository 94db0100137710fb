use std::path::Path;

use thiserror::Error;

/// Error types for the Playdeck library.
///
/// This enum represents the errors that can surface while building a
/// player: configuration loading, parsing and validation. Runtime media,
/// platform and streaming failures are recovered where they happen and
/// have their own error types in the respective services.
#[derive(Error, Debug)]
pub enum PlaydeckError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// Configuration field missing or invalid
    #[error("invalid config field '{field}' in {component}: {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Component containing the field
        component: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: std::path::PathBuf,
        /// I/O error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Schema export error
    #[error("failed to export configuration schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// A specialized `Result` type for Playdeck operations.
pub type Result<T> = std::result::Result<T, PlaydeckError>;

impl PlaydeckError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        PlaydeckError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error with file path context.
    pub fn io(error: impl std::fmt::Display, path: &Path) -> Self {
        PlaydeckError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }

    /// Creates an invalid-field error for a configuration section.
    pub fn invalid_field(
        component: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PlaydeckError::InvalidConfigField {
            field: field.into(),
            component: component.into(),
            reason: reason.into(),
        }
    }
}
