// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store trait definition.
//!
//! This module defines the `DocumentStore` trait, the port through which the
//! repository reaches the physical database. Any backend (memory, files, Redis,
//! a real document database) must implement this trait.

use crate::domain::{ConfigDocument, Filter, Result};

/// A primary-key indexed store of config documents.
///
/// The store enforces uniqueness of document names itself: `insert` must fail
/// with `ConfigError::DuplicateKey` when a document with the same name exists.
/// Beyond that, each call is independent; no multi-document transaction is
/// implied by calling several methods in a row.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` and take `&self` everywhere, so a single
/// store can be shared between repositories and threads.
///
/// # Examples
///
/// ```rust
/// use cfgstore::ports::DocumentStore;
/// use cfgstore::domain::{ConfigDocument, Filter, Result};
///
/// struct EmptyStore;
///
/// impl DocumentStore for EmptyStore {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn count(&self, _filter: &Filter) -> Result<u64> {
///         Ok(0)
///     }
///
///     fn find_one(&self, _filter: &Filter) -> Result<Option<ConfigDocument>> {
///         Ok(None)
///     }
///
///     fn find_many(&self, _filter: &Filter) -> Result<Vec<ConfigDocument>> {
///         Ok(vec![])
///     }
///
///     fn insert(&self, _document: ConfigDocument) -> Result<()> {
///         Ok(())
///     }
///
///     fn save(&self, _document: ConfigDocument) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// assert_eq!(EmptyStore.count(&Filter::All).unwrap(), 0);
/// ```
pub trait DocumentStore: Send + Sync {
    /// Returns the name of this store, used in logs and error messages.
    fn name(&self) -> &str;

    /// Counts the documents matching the filter.
    fn count(&self, filter: &Filter) -> Result<u64>;

    /// Returns one document matching the filter, if any.
    ///
    /// With a `Filter::Name` there is at most one match.
    fn find_one(&self, filter: &Filter) -> Result<Option<ConfigDocument>>;

    /// Returns every document matching the filter.
    fn find_many(&self, filter: &Filter) -> Result<Vec<ConfigDocument>>;

    /// Writes a new document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateKey` if a document with the same name exists.
    fn insert(&self, document: ConfigDocument) -> Result<()>;

    /// Writes a document, replacing any existing document with the same name.
    fn save(&self, document: ConfigDocument) -> Result<()>;
}
