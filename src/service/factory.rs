// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construction of new configs from raw caller input.
//!
//! The factory validates the name and properties, drops blank parent names and
//! blank property entries, and stamps the result with revision 1 and the current
//! instant from its clock. It performs no I/O.

use crate::adapters::SystemClock;
use crate::domain::config_name::is_blank;
use crate::domain::{Config, ConfigError, ConfigName, Result};
use crate::ports::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Revision assigned to every newly created config.
pub const INITIAL_REVISION: u32 = 1;

/// Builds new, well-formed configs.
///
/// # Examples
///
/// ```rust
/// use cfgstore::service::ConfigFactory;
///
/// # fn main() -> cfgstore::domain::Result<()> {
/// let factory = ConfigFactory::new();
/// let config = factory.create("web", ["base", ""], [("port", "8080"), ("", "x")])?;
///
/// assert_eq!(config.revision(), 1);
/// assert_eq!(config.parents().len(), 1);
/// assert_eq!(config.property("port"), Some("8080"));
/// assert_eq!(config.properties().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConfigFactory {
    clock: Arc<dyn Clock>,
}

impl ConfigFactory {
    /// Creates a factory that reads the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a factory that reads the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Creates a new config.
    ///
    /// Blank parent names are dropped, as are properties whose key or value is
    /// blank. The returned config has revision 1, no children, and equal creation
    /// and modification instants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if `name` is blank or `properties`
    /// is empty as supplied. Emptiness is checked before blank entries are
    /// dropped, so input made only of blank entries yields a config without
    /// properties.
    pub fn create<P, S, M, K, V>(&self, name: &str, parents: P, properties: M) -> Result<Config>
    where
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
        M: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = ConfigName::new(name)?;

        let properties: Vec<(String, String)> = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if properties.is_empty() {
            return Err(ConfigError::invalid_argument("properties must not be empty"));
        }

        let now = self.clock.now();
        Config::new(
            name,
            INITIAL_REVISION,
            now,
            now,
            non_blank_names(parents),
            BTreeSet::new(),
            non_blank_properties(properties),
        )
    }

    /// Creates a new config that has no parents.
    pub fn create_root<M, K, V>(&self, name: &str, properties: M) -> Result<Config>
    where
        M: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.create(name, std::iter::empty::<&str>(), properties)
    }
}

impl Default for ConfigFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFactory").finish_non_exhaustive()
    }
}

fn non_blank_names<P, S>(names: P) -> BTreeSet<ConfigName>
where
    P: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|n| ConfigName::new(n.as_ref()).ok())
        .collect()
}

fn non_blank_properties(properties: Vec<(String, String)>) -> BTreeMap<String, String> {
    properties
        .into_iter()
        .filter(|(k, v)| !is_blank(k) && !is_blank(v))
        .collect()
}
