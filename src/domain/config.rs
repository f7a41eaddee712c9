// SPDX-License-Identifier: MIT OR Apache-2.0

//! The immutable config value.
//!
//! A `Config` is a named, versioned set of key/value properties together with the
//! names of the configs it inherits from. Once built it cannot be changed: every
//! field is private and only shared references are handed out.

use crate::domain::config_name::ConfigName;
use crate::domain::errors::{ConfigError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Classification of a config's content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigType {
    /// Plain text key/value properties.
    #[default]
    #[serde(rename = "text/plain")]
    Text,
}

impl ConfigType {
    /// Returns the human readable description of this type.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigType::Text => "text/plain",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A named, immutable configuration document.
///
/// Configs are normally produced by [`ConfigFactory`](crate::service::ConfigFactory),
/// which fixes the revision at 1 and stamps both timestamps with the same instant.
/// [`Config::new`] is the lower-level constructor used when rebuilding a config
/// from its stored form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    name: ConfigName,
    revision: u32,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
    parents: BTreeSet<ConfigName>,
    children: BTreeSet<ConfigName>,
    properties: BTreeMap<String, String>,
}

impl Config {
    /// Creates a config from already validated parts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if `revision` is zero.
    pub fn new(
        name: ConfigName,
        revision: u32,
        created_at: DateTime<Utc>,
        last_modified_at: DateTime<Utc>,
        parents: BTreeSet<ConfigName>,
        children: BTreeSet<ConfigName>,
        properties: BTreeMap<String, String>,
    ) -> Result<Self> {
        if revision == 0 {
            return Err(ConfigError::invalid_argument(
                "revision must be greater than zero",
            ));
        }

        Ok(Self {
            name,
            revision,
            created_at,
            last_modified_at,
            parents,
            children,
            properties,
        })
    }

    /// Returns the config name.
    pub fn name(&self) -> &ConfigName {
        &self.name
    }

    /// Returns the revision, always greater than zero.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Returns the creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the instant of the last modification.
    pub fn last_modified_at(&self) -> DateTime<Utc> {
        self.last_modified_at
    }

    /// Returns the content classification.
    pub fn config_type(&self) -> ConfigType {
        ConfigType::Text
    }

    /// Returns the names of the configs this config inherits from.
    pub fn parents(&self) -> &BTreeSet<ConfigName> {
        &self.parents
    }

    /// Returns the names of the configs that declare this config as a parent.
    pub fn children(&self) -> &BTreeSet<ConfigName> {
        &self.children
    }

    /// Returns the key/value properties.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Returns the value of a single property.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}
