// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store selection settings.
//!
//! `StoreSettings` describes which document store backend a repository should
//! use. Settings can be written in code, read from a YAML document, or read from
//! environment variables.

use crate::domain::{ConfigError, Result};
use crate::ports::DocumentStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Hash name used by the Redis backend when none is configured.
pub const DEFAULT_REDIS_NAMESPACE: &str = "configs";

/// Default prefix for environment variables read by [`StoreSettings::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "CFGSTORE_";

fn default_redis_namespace() -> String {
    DEFAULT_REDIS_NAMESPACE.to_string()
}

/// Which document store to open.
///
/// # Examples
///
/// ```rust
/// use cfgstore::service::StoreSettings;
///
/// # #[cfg(feature = "yaml")]
/// # fn main() -> cfgstore::domain::Result<()> {
/// let settings = StoreSettings::from_yaml_str("backend: yaml_dir\npath: /tmp/configs\n")?;
/// assert_eq!(
///     settings,
///     StoreSettings::YamlDir { path: "/tmp/configs".into() }
/// );
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "yaml"))]
/// # fn main() {}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreSettings {
    /// Keep documents in process memory.
    #[default]
    Memory,
    /// Keep documents as YAML files in a directory.
    YamlDir {
        /// Directory holding the document files
        path: PathBuf,
    },
    /// Keep documents in a Redis hash.
    Redis {
        /// Redis connection URL
        url: String,
        /// Name of the hash holding the documents
        #[serde(default = "default_redis_namespace")]
        namespace: String,
    },
}

impl StoreSettings {
    /// Parses settings from a YAML document.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse store settings: {}", e),
            source: Some(Box::new(e)),
        })
    }

    /// Reads settings from the process environment.
    ///
    /// See [`from_vars`](StoreSettings::from_vars) for the variables consulted.
    #[cfg(feature = "env")]
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Reads settings from the given variables.
    ///
    /// The variables consulted are `<prefix>BACKEND` (`memory`, `yaml_dir` or
    /// `redis`; `memory` when unset), `<prefix>PATH` for `yaml_dir`, and
    /// `<prefix>REDIS_URL` and `<prefix>REDIS_NAMESPACE` for `redis`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cfgstore::service::StoreSettings;
    ///
    /// let vars = [
    ///     ("APP_BACKEND".to_string(), "redis".to_string()),
    ///     ("APP_REDIS_URL".to_string(), "redis://localhost".to_string()),
    /// ];
    /// let settings = StoreSettings::from_vars("APP_", vars).unwrap();
    /// assert_eq!(
    ///     settings,
    ///     StoreSettings::Redis {
    ///         url: "redis://localhost".to_string(),
    ///         namespace: "configs".to_string(),
    ///     }
    /// );
    /// ```
    #[cfg(feature = "env")]
    pub fn from_vars<I>(prefix: &str, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: std::collections::HashMap<String, String> = vars
            .into_iter()
            .filter_map(|(k, v)| k.strip_prefix(prefix).map(|k| (k.to_string(), v)))
            .collect();

        let required = |key: &str| {
            vars.get(key).cloned().ok_or_else(|| {
                ConfigError::invalid_argument(format!("{}{} must be set", prefix, key))
            })
        };

        match vars.get("BACKEND").map(|b| b.trim().to_lowercase()).as_deref() {
            None | Some("memory") => Ok(StoreSettings::Memory),
            Some("yaml_dir") => Ok(StoreSettings::YamlDir {
                path: PathBuf::from(required("PATH")?),
            }),
            Some("redis") => Ok(StoreSettings::Redis {
                url: required("REDIS_URL")?,
                namespace: vars
                    .get("REDIS_NAMESPACE")
                    .cloned()
                    .unwrap_or_else(default_redis_namespace),
            }),
            Some(other) => Err(ConfigError::invalid_argument(format!(
                "Unknown store backend '{}'",
                other
            ))),
        }
    }

    /// Opens the document store these settings describe.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if the backend was not compiled in,
    /// or the backend's own error if it cannot be opened.
    pub fn open(&self) -> Result<Arc<dyn DocumentStore>> {
        tracing::debug!("Opening document store: {:?}", self);

        match self {
            StoreSettings::Memory => Ok(Arc::new(crate::adapters::InMemoryStore::new())),
            #[cfg(feature = "yaml")]
            StoreSettings::YamlDir { path } => {
                Ok(Arc::new(crate::adapters::YamlFileStore::open(path)?))
            }
            #[cfg(not(feature = "yaml"))]
            StoreSettings::YamlDir { .. } => Err(ConfigError::invalid_argument(
                "The yaml_dir backend requires the `yaml` feature",
            )),
            #[cfg(feature = "redis")]
            StoreSettings::Redis { url, namespace } => {
                Ok(Arc::new(crate::adapters::RedisStore::new(url, namespace)?))
            }
            #[cfg(not(feature = "redis"))]
            StoreSettings::Redis { .. } => Err(ConfigError::invalid_argument(
                "The redis backend requires the `redis` feature",
            )),
        }
    }
}
