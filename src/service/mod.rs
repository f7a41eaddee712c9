// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the factory and repository implementations.
//!
//! This module wires the domain types to the document store ports: the config
//! factory, the default `ConfigRepository` implementation, and the settings used
//! to pick a store backend.

pub mod default_repository;
pub mod factory;
pub mod settings;

// Re-export commonly used types
pub use default_repository::DefaultConfigRepository;
pub use factory::ConfigFactory;
pub use settings::StoreSettings;
