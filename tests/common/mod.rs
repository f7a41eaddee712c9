// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

use cfgstore::adapters::FixedClock;
use cfgstore::service::ConfigFactory;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, OnceLock};

/// Cached result of Docker availability check.
#[allow(dead_code)]
static DOCKER_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Checks if Docker is available on the system.
///
/// This check is cached after the first call.
#[allow(dead_code)]
pub fn is_docker_available() -> bool {
    *DOCKER_AVAILABLE.get_or_init(|| {
        // Try to run `docker ps` command
        std::process::Command::new("docker")
            .args(["ps"])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    })
}

/// Prints a warning message that a test is skipped due to Docker being unavailable.
#[allow(dead_code)]
pub fn print_docker_unavailable_warning(test_name: &str) {
    eprintln!("\n⚠️  SKIPPED: {} - Docker is not available", test_name);
    eprintln!("   To run this test, ensure Docker is installed and running.");
    eprintln!("   Installation: https://docs.docker.com/get-docker/\n");
}

/// Installs a test-friendly tracing subscriber once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A factory whose clock is frozen, so created configs are reproducible.
#[allow(dead_code)]
pub fn fixed_factory() -> ConfigFactory {
    let instant = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    ConfigFactory::with_clock(Arc::new(FixedClock::new(instant)))
}

/// Generates a unique config name with the given prefix.
#[allow(dead_code)]
pub fn random_name(prefix: &str) -> String {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!(
        "{}_{}_{}",
        prefix,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}
