// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture store for hierarchical configuration documents.
//!
//! This crate stores named, immutable configs. Each config holds key/value
//! properties and may declare parent configs, forming an inheritance graph. The
//! store guarantees that names are unique and that a config's parents exist
//! before the config itself can be inserted.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`Config`, `ConfigName`, `ConfigDocument`, errors)
//!   and the `ConfigRepository` interface
//! - **Ports**: Trait definitions for the outside world (`DocumentStore`, `Clock`)
//! - **Adapters**: Implementations for specific backends (memory, YAML files, Redis)
//! - **Service**: The config factory, the default repository, and store settings
//!
//! # Features
//!
//! - **Immutable configs**: Properties, parents, and children never change after construction
//! - **Referential integrity**: Inserting a config whose parents are missing is rejected
//! - **Parent expansion**: Read a config together with its direct parents in one call
//! - **Pluggable storage**: Any backend implementing `DocumentStore` can be used
//!
//! # Feature Flags
//!
//! - `yaml`: Enable the YAML file store and YAML settings (default)
//! - `env`: Enable reading store settings from environment variables (default)
//! - `redis`: Enable the Redis store
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use cfgstore::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let repository = DefaultConfigRepository::in_memory();
//! let factory = ConfigFactory::new();
//!
//! repository.insert(factory.create_root("a", [("k1", "v1")])?)?;
//! assert!(repository.exists("a")?);
//!
//! repository.insert(factory.create("b", ["a"], [("k2", "v2")])?)?;
//! let b = repository.find_config("b")?.expect("b was inserted");
//! assert!(b.parents().contains("a"));
//!
//! let orphan = factory.create("c", ["missing"], [("k3", "v3")])?;
//! assert!(matches!(
//!     repository.insert(orphan),
//!     Err(ConfigError::IntegrityViolation { .. })
//! ));
//! assert!(!repository.exists("c")?);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        Config, ConfigDocument, ConfigError, ConfigName, ConfigRepository, ConfigType, Filter,
        Result,
    };
    pub use crate::ports::{Clock, DocumentStore};
    pub use crate::service::{ConfigFactory, DefaultConfigRepository, StoreSettings};

    pub use crate::adapters::{FixedClock, InMemoryStore, SystemClock};
    // Re-export adapters based on feature flags
    #[cfg(feature = "redis")]
    pub use crate::adapters::RedisStore;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlFileStore;
}
