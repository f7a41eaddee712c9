// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing document store and clock implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer. Each store adapter implements `DocumentStore` on top of a
//! specific backend.

pub mod clock;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
pub use clock::{FixedClock, SystemClock};
pub use memory::InMemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlFileStore;
