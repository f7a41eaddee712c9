// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config name newtype.
//!
//! This module provides the `ConfigName` type, a validated wrapper around `String`
//! used as the primary key of a config. A `ConfigName` is never blank.

use crate::domain::errors::{ConfigError, Result};
use std::borrow::Borrow;
use std::fmt;

/// Returns `true` if the string is empty or consists only of whitespace.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// The unique, non-blank name of a config.
///
/// Names are compared, ordered, and hashed exactly like their string contents,
/// so maps keyed by `ConfigName` can be queried with a plain `&str`.
///
/// # Examples
///
/// ```
/// use cfgstore::domain::ConfigName;
///
/// let name = ConfigName::new("database").unwrap();
/// assert_eq!(name.as_str(), "database");
///
/// assert!(ConfigName::new("   ").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigName(String);

impl ConfigName {
    /// Creates a new `ConfigName`, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if `name` is empty or whitespace only.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if is_blank(&name) {
            return Err(ConfigError::invalid_argument("name must not be blank"));
        }
        Ok(ConfigName(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigName` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConfigName {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self> {
        ConfigName::new(s)
    }
}

impl TryFrom<&str> for ConfigName {
    type Error = ConfigError;

    fn try_from(s: &str) -> Result<Self> {
        ConfigName::new(s)
    }
}

impl From<ConfigName> for String {
    fn from(name: ConfigName) -> Self {
        name.0
    }
}

impl AsRef<str> for ConfigName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConfigName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConfigName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConfigName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ConfigName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
