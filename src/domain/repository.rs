// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config repository trait definition.
//!
//! This module defines the `ConfigRepository` trait, the main interface for
//! storing configs and reading them back.

use crate::domain::{Config, ConfigName, Result};
use std::collections::BTreeMap;

/// The main config repository trait.
///
/// A repository stores immutable configs and enforces that every parent a
/// config declares is already stored when the config is inserted.
///
/// Name arguments are plain strings; blank names are rejected with
/// `ConfigError::InvalidArgument` before the store is touched.
pub trait ConfigRepository: Send + Sync {
    /// Checks whether a config with the given name is stored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if `name` is blank.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Inserts a new config.
    ///
    /// Returns the config that was passed in; nothing is read back from the store.
    ///
    /// # Errors
    ///
    /// * `ConfigError::IntegrityViolation` - a declared parent is not stored;
    ///   nothing is written
    /// * `ConfigError::DuplicateKey` - a config with the same name is stored
    fn insert(&self, config: Config) -> Result<Config>;

    /// Writes a config, replacing any stored config with the same name.
    ///
    /// Unlike [`insert`](ConfigRepository::insert) this skips the parent check.
    fn save(&self, config: Config) -> Result<Config>;

    /// Returns the config with the given name, or `None` if it is not stored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if `name` is blank.
    fn find_config(&self, name: &str) -> Result<Option<Config>>;

    /// Returns the named config together with its direct parents, keyed by name.
    ///
    /// The map is empty if the config is not stored. Grandparents are not
    /// included.
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidArgument` - `name` is blank
    /// * `ConfigError::InvariantViolation` - some declared parents are missing
    ///   from the store
    fn find_config_with_parents(&self, name: &str) -> Result<BTreeMap<ConfigName, Config>>;
}
