// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration store.
//!
//! This module defines the errors that can occur when constructing configs or
//! reading and writing them through a document store. All errors use `thiserror`
//! for proper error handling and conversion.

use thiserror::Error;

/// The main error type for configuration store operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use cfgstore::domain::errors::ConfigError;
///
/// fn lookup(name: &str) -> Result<(), ConfigError> {
///     if name.trim().is_empty() {
///         return Err(ConfigError::invalid_argument("name must not be blank"));
///     }
///     Ok(())
/// }
///
/// assert!(lookup("  ").is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Malformed caller input, detected before any store access.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// Some of the parents declared by a config are missing from the store.
    #[error(
        "Can't insert config '{name}', because some of its parents are missing in the store \
         (declared {expected}, found {found})"
    )]
    IntegrityViolation {
        /// The config that was rejected
        name: String,
        /// Number of declared parents
        expected: usize,
        /// Number of declared parents present in the store
        found: u64,
    },

    /// A document with the same primary key already exists in the store.
    #[error("Config '{name}' already exists in the store")]
    DuplicateKey {
        /// The duplicated config name
        name: String,
    },

    /// The store contents contradict an invariant the repository relies on.
    #[error("Store invariant violated: {message}")]
    InvariantViolation {
        /// Description of the inconsistency
        message: String,
    },

    /// An error occurred in a document store backend.
    #[error("Document store '{store_name}' error: {message}")]
    StoreError {
        /// The name of the store that encountered the error
        store_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A stored document or settings file could not be decoded.
    #[error("Failed to parse document: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while accessing a store.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates an `InvalidArgument` error with the given message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ConfigError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a `StoreError` without an underlying cause.
    pub fn store(store_name: &str, message: impl Into<String>) -> Self {
        ConfigError::StoreError {
            store_name: store_name.to_string(),
            message: message.into(),
            source: None,
        }
    }
}

/// A specialized Result type for configuration store operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let error = ConfigError::invalid_argument("name must not be blank");
        assert_eq!(
            error.to_string(),
            "Invalid argument: name must not be blank"
        );
    }

    #[test]
    fn test_integrity_violation_error() {
        let error = ConfigError::IntegrityViolation {
            name: "child".to_string(),
            expected: 2,
            found: 1,
        };
        let message = error.to_string();
        assert!(message.contains("'child'"));
        assert!(message.contains("declared 2, found 1"));
    }

    #[test]
    fn test_duplicate_key_error() {
        let error = ConfigError::DuplicateKey {
            name: "base".to_string(),
        };
        assert_eq!(error.to_string(), "Config 'base' already exists in the store");
    }

    #[test]
    fn test_invariant_violation_error() {
        let error = ConfigError::InvariantViolation {
            message: "parent count mismatch".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Store invariant violated: parent count mismatch"
        );
    }

    #[test]
    fn test_store_error() {
        let error = ConfigError::store("memory", "lock poisoned");
        assert_eq!(
            error.to_string(),
            "Document store 'memory' error: lock poisoned"
        );
    }

    #[test]
    fn test_parse_error() {
        let error = ConfigError::ParseError {
            message: "Invalid YAML".to_string(),
            source: None,
        };
        assert_eq!(error.to_string(), "Failed to parse document: Invalid YAML");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }
}
