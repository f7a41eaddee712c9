// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document store adapter.
//!
//! This module provides a store that keeps documents in a map guarded by a
//! `RwLock`. It is the default backend and the one used by most tests.

use crate::domain::{ConfigDocument, ConfigError, Filter, Result};
use crate::ports::DocumentStore;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const STORE_NAME: &str = "memory";

/// Document store adapter backed by process memory.
///
/// Documents are kept in name order. The write lock makes each `insert`
/// atomic, so two concurrent inserts of the same name cannot both succeed.
///
/// # Examples
///
/// ```rust
/// use cfgstore::adapters::InMemoryStore;
/// use cfgstore::domain::Filter;
/// use cfgstore::ports::DocumentStore;
///
/// let store = InMemoryStore::new();
/// assert_eq!(store.count(&Filter::All).unwrap(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: RwLock<BTreeMap<String, ConfigDocument>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with documents, bypassing uniqueness checks.
    #[cfg(test)]
    pub(crate) fn with_documents(documents: impl IntoIterator<Item = ConfigDocument>) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.name.clone(), doc))
            .collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Removes a document, returning it if present.
    ///
    /// The repository never deletes configs; this exists so that tests can
    /// simulate another writer tampering with the store.
    pub fn remove(&self, name: &str) -> Result<Option<ConfigDocument>> {
        Ok(self.write()?.remove(name))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, ConfigDocument>>> {
        self.documents
            .read()
            .map_err(|_| ConfigError::store(STORE_NAME, "Store lock is poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, ConfigDocument>>> {
        self.documents
            .write()
            .map_err(|_| ConfigError::store(STORE_NAME, "Store lock is poisoned"))
    }
}

impl DocumentStore for InMemoryStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn count(&self, filter: &Filter) -> Result<u64> {
        let documents = self.read()?;
        let count = match filter {
            Filter::All => documents.len(),
            Filter::Name(name) => usize::from(documents.contains_key(name)),
            Filter::NameIn(names) => names.iter().filter(|n| documents.contains_key(*n)).count(),
        };
        Ok(count as u64)
    }

    fn find_one(&self, filter: &Filter) -> Result<Option<ConfigDocument>> {
        let documents = self.read()?;
        let found = match filter {
            Filter::Name(name) => documents.get(name).cloned(),
            _ => documents
                .values()
                .find(|doc| filter.matches(&doc.name))
                .cloned(),
        };
        Ok(found)
    }

    fn find_many(&self, filter: &Filter) -> Result<Vec<ConfigDocument>> {
        let documents = self.read()?;
        Ok(documents
            .values()
            .filter(|doc| filter.matches(&doc.name))
            .cloned()
            .collect())
    }

    fn insert(&self, document: ConfigDocument) -> Result<()> {
        let mut documents = self.write()?;
        match documents.entry(document.name.clone()) {
            Entry::Occupied(_) => Err(ConfigError::DuplicateKey {
                name: document.name,
            }),
            Entry::Vacant(slot) => {
                tracing::debug!("Inserted document '{}' into memory store", document.name);
                slot.insert(document);
                Ok(())
            }
        }
    }

    fn save(&self, document: ConfigDocument) -> Result<()> {
        let mut documents = self.write()?;
        tracing::debug!("Saved document '{}' into memory store", document.name);
        documents.insert(document.name.clone(), document);
        Ok(())
    }
}
