// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default config repository implementation.
//!
//! This module provides the default implementation of the `ConfigRepository`
//! trait on top of any `DocumentStore`.

use crate::adapters::InMemoryStore;
use crate::domain::config_name::is_blank;
use crate::domain::{
    Config, ConfigDocument, ConfigError, ConfigName, ConfigRepository, Filter, Result,
};
use crate::ports::DocumentStore;
use crate::service::settings::StoreSettings;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default implementation of the config repository.
///
/// The repository keeps no state of its own; everything lives in the shared
/// document store.
///
/// The parent check and the write are two separate store calls. If another
/// writer removes a parent between them, the inserted config ends up referring
/// to a missing parent. Configs are never deleted through this crate, so the
/// window only matters for stores shared with other writers.
///
/// # Examples
///
/// ```rust
/// use cfgstore::prelude::*;
///
/// # fn main() -> Result<()> {
/// let repository = DefaultConfigRepository::in_memory();
/// let factory = ConfigFactory::new();
///
/// repository.insert(factory.create_root("base", [("timeout", "30")])?)?;
/// repository.insert(factory.create("web", ["base"], [("port", "8080")])?)?;
///
/// let family = repository.find_config_with_parents("web")?;
/// assert_eq!(family.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DefaultConfigRepository {
    store: Arc<dyn DocumentStore>,
}

impl DefaultConfigRepository {
    /// Creates a repository on top of the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Creates a repository backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    /// Creates a repository on the store described by `settings`.
    pub fn from_settings(settings: &StoreSettings) -> Result<Self> {
        Ok(Self::new(settings.open()?))
    }

    /// Returns the backing document store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    fn check_name(name: &str) -> Result<()> {
        if is_blank(name) {
            return Err(ConfigError::invalid_argument("name must not be blank"));
        }
        Ok(())
    }

    /// Fails unless every parent declared by `config` is stored.
    fn check_parents_exist(&self, config: &Config) -> Result<()> {
        let expected = config.parents().len();
        let found = self.store.count(&Filter::name_in(config.parents()))?;

        if found != expected as u64 {
            tracing::warn!(
                "Rejected config '{}': {} of {} declared parents are stored in '{}'",
                config.name(),
                found,
                expected,
                self.store.name()
            );
            return Err(ConfigError::IntegrityViolation {
                name: config.name().to_string(),
                expected,
                found,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for DefaultConfigRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultConfigRepository")
            .field("store", &self.store.name())
            .finish()
    }
}

impl ConfigRepository for DefaultConfigRepository {
    fn exists(&self, name: &str) -> Result<bool> {
        Self::check_name(name)?;
        let count = self.store.count(&Filter::Name(name.to_string()))?;
        Ok(count == 1)
    }

    fn insert(&self, config: Config) -> Result<Config> {
        if !config.parents().is_empty() {
            self.check_parents_exist(&config)?;
        }

        self.store.insert(ConfigDocument::from(&config))?;
        tracing::debug!(
            "Inserted config '{}' with {} parent(s) into '{}'",
            config.name(),
            config.parents().len(),
            self.store.name()
        );

        Ok(config)
    }

    fn save(&self, config: Config) -> Result<Config> {
        self.store.save(ConfigDocument::from(&config))?;
        tracing::debug!("Saved config '{}' into '{}'", config.name(), self.store.name());
        Ok(config)
    }

    fn find_config(&self, name: &str) -> Result<Option<Config>> {
        Self::check_name(name)?;
        self.store
            .find_one(&Filter::Name(name.to_string()))?
            .map(Config::try_from)
            .transpose()
    }

    fn find_config_with_parents(&self, name: &str) -> Result<BTreeMap<ConfigName, Config>> {
        let Some(config) = self.find_config(name)? else {
            return Ok(BTreeMap::new());
        };

        let mut result = BTreeMap::new();
        if !config.parents().is_empty() {
            let parents = self.store.find_many(&Filter::name_in(config.parents()))?;

            // Inserts check parents, so only an outside change to the store gets here.
            if parents.len() != config.parents().len() {
                tracing::error!(
                    "Config '{}' declares {} parent(s) but '{}' holds {}",
                    name,
                    config.parents().len(),
                    self.store.name(),
                    parents.len()
                );
                return Err(ConfigError::InvariantViolation {
                    message: format!(
                        "Number of parents in the store is not equal to number of parents in '{}' config",
                        name
                    ),
                });
            }

            for parent in parents {
                let parent = Config::try_from(parent)?;
                result.insert(parent.name().clone(), parent);
            }
        }

        result.insert(config.name().clone(), config);
        Ok(result)
    }
}
