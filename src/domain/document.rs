// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted representation of configs and the filters used to query it.
//!
//! Document stores never see a [`Config`] directly. They store and return
//! [`ConfigDocument`]s, which are plain serde structures keyed by config name.

use crate::domain::config::{Config, ConfigType};
use crate::domain::config_name::ConfigName;
use crate::domain::errors::{ConfigError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The stored form of a [`Config`].
///
/// The config name is the primary key and is serialized as `_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Primary key
    #[serde(rename = "_id")]
    pub name: String,
    /// Revision of the config
    pub revision: u32,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Last modification instant
    pub last_modified_at: DateTime<Utc>,
    /// Content classification
    #[serde(default)]
    pub config_type: ConfigType,
    /// Names of parent configs
    #[serde(default)]
    pub parents: BTreeSet<String>,
    /// Names of child configs
    #[serde(default)]
    pub children: BTreeSet<String>,
    /// Key/value properties
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl From<&Config> for ConfigDocument {
    fn from(config: &Config) -> Self {
        Self {
            name: config.name().as_str().to_string(),
            revision: config.revision(),
            created_at: config.created_at(),
            last_modified_at: config.last_modified_at(),
            config_type: config.config_type(),
            parents: names_to_strings(config.parents()),
            children: names_to_strings(config.children()),
            properties: config.properties().clone(),
        }
    }
}

impl TryFrom<ConfigDocument> for Config {
    type Error = ConfigError;

    fn try_from(document: ConfigDocument) -> Result<Self> {
        let malformed = |e: ConfigError| ConfigError::ParseError {
            message: format!("Stored document '{}' is malformed", document.name),
            source: Some(Box::new(e)),
        };

        let name = ConfigName::new(document.name.as_str()).map_err(malformed)?;
        let parents = strings_to_names(&document.parents).map_err(malformed)?;
        let children = strings_to_names(&document.children).map_err(malformed)?;

        Config::new(
            name,
            document.revision,
            document.created_at,
            document.last_modified_at,
            parents,
            children,
            document.properties.clone(),
        )
        .map_err(malformed)
    }
}

fn names_to_strings(names: &BTreeSet<ConfigName>) -> BTreeSet<String> {
    names.iter().map(|n| n.as_str().to_string()).collect()
}

fn strings_to_names(names: &BTreeSet<String>) -> Result<BTreeSet<ConfigName>> {
    names.iter().map(|n| ConfigName::new(n.as_str())).collect()
}

/// A query over the primary keys of stored documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Matches the document whose name equals the given one.
    Name(String),
    /// Matches every document whose name is in the given set.
    NameIn(BTreeSet<String>),
}

impl Filter {
    /// Builds a membership filter from a set of config names.
    pub fn name_in<'a>(names: impl IntoIterator<Item = &'a ConfigName>) -> Self {
        Filter::NameIn(names.into_iter().map(|n| n.as_str().to_string()).collect())
    }

    /// Returns `true` if a document with the given name matches this filter.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Name(expected) => expected == name,
            Filter::NameIn(names) => names.contains(name),
        }
    }
}
