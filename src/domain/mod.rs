// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the config value, its stored form, the error type, and
//! the repository interface. It is independent of any storage backend.

pub mod config;
pub mod config_name;
pub mod document;
pub mod errors;
pub mod repository;

// Re-export commonly used types
pub use config::{Config, ConfigType};
pub use config_name::ConfigName;
pub use document::{ConfigDocument, Filter};
pub use errors::{ConfigError, Result};
pub use repository::ConfigRepository;
