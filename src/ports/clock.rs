// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clock trait definition.
//!
//! The config factory takes the creation instant from a `Clock` instead of
//! reading system time directly, so construction is deterministic in tests.

use chrono::{DateTime, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
