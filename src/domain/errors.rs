// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the binding crate.
//!
//! This module defines the errors that can occur while resolving field paths, coercing
//! values and reading configuration sources. All errors use `thiserror`.

use thiserror::Error;

/// A boxed error as produced by parsers and decoders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for binding operations.
///
/// Marked `#[non_exhaustive]` so that new failure modes can be added without breaking
/// downstream matches.
///
/// # Examples
///
/// ```
/// use cfgbind::domain::errors::ConfigError;
///
/// fn lookup() -> Result<(), ConfigError> {
///     Err(ConfigError::FieldNotFound {
///         path: "Database.Host".to_string(),
///     })
/// }
///
/// assert!(lookup().unwrap_err().is_not_found());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The path does not resolve to a field at some segment.
    #[error("Field not found: {path}")]
    FieldNotFound {
        /// The dotted path that failed to resolve
        path: String,
    },

    /// The resolved field is registered read-only.
    #[error("Field cannot be set: {path}")]
    FieldNotSettable {
        /// The dotted path of the read-only field
        path: String,
    },

    /// A typed value does not match the field's declared type.
    #[error("Cannot assign value of type {found} to field '{path}' of type {expected}")]
    TypeMismatch {
        /// The dotted path of the field
        path: String,
        /// The field's declared type
        expected: String,
        /// The type of the supplied value
        found: String,
    },

    /// Failed to convert a text value into the field's declared type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The dotted path being assigned
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: BoxError,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<BoxError>,
    },

    /// Failed to decode configuration content.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying decoder error
        #[source]
        source: Option<BoxError>,
    },

    /// An I/O error occurred while reading a configuration file.
    #[error("I/O error reading '{path}': {source}")]
    IoError {
        /// The file that could not be read
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Returns `true` if this error means the path named no field.
    ///
    /// Path-based sources skip entries failing this way; every other error aborts them.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::FieldNotFound { .. })
    }

    pub(crate) fn not_found(path: impl ToString) -> Self {
        ConfigError::FieldNotFound {
            path: path.to_string(),
        }
    }

    pub(crate) fn not_settable(path: impl ToString) -> Self {
        ConfigError::FieldNotSettable {
            path: path.to_string(),
        }
    }
}

/// A specialized Result type for binding operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
