//! Error types for PFE memory check operations.
//!
//! All errors implement `std::error::Error` via `thiserror`.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for PFE memory check operations.
pub type PfeMemoryResult<T> = Result<T, PfeMemoryError>;

/// Errors that can occur while reshaping or checking PFE memory data.
#[derive(Debug, Error)]
pub enum PfeMemoryError {
    /// A card carried a number of memory readings the reshaper cannot split.
    #[error("Unsupported memory value count for '{card}': {count} (expected 0, 2 or 4)")]
    UnsupportedValueCount {
        /// The FPC description.
        card: String,
        /// Number of readings collected for the card.
        count: usize,
    },

    /// A field required for evaluation is absent from the card record.
    #[error("Missing field '{field}' for item '{item}'")]
    MissingField {
        /// The check item.
        item: String,
        /// The record field name (e.g. "nh_free1").
        field: String,
    },

    /// A memory reading is not an integer percentage.
    #[error("Invalid value '{value}' in field '{field}' for item '{item}': {source}")]
    InvalidValue {
        /// The check item.
        item: String,
        /// The record field name.
        field: String,
        /// The raw value.
        value: String,
        /// The underlying conversion error.
        #[source]
        source: ParseIntError,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// Failed to read a configuration file.
    #[error("Failed to read configuration file '{}': {source}", .path.display())]
    ConfigRead {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Failed to deserialize configuration.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

impl PfeMemoryError {
    /// Creates an unsupported value count error.
    pub fn unsupported_value_count(card: impl Into<String>, count: usize) -> Self {
        Self::UnsupportedValueCount {
            card: card.into(),
            count,
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(item: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            item: item.into(),
            field: field.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error was caused by malformed device data
    /// rather than by local configuration.
    pub fn is_malformed_data(&self) -> bool {
        matches!(
            self,
            PfeMemoryError::UnsupportedValueCount { .. }
                | PfeMemoryError::MissingField { .. }
                | PfeMemoryError::InvalidValue { .. }
        )
    }
}
