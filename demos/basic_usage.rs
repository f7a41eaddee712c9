// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the config store.
//!
//! This example demonstrates:
//! - Opening a store from environment settings (falls back to a temp YAML directory)
//! - Creating configs with the factory
//! - Parent checks on insert
//! - Reading a config together with its parents
//!
//! To run this example:
//! ```bash
//! # Optionally point the store at a directory
//! export CFGSTORE_BACKEND="yaml_dir"
//! export CFGSTORE_PATH="/tmp/cfgstore-demo"
//!
//! # Run the example
//! cargo run --example basic_usage
//! ```

use cfgstore::prelude::*;
use cfgstore::service::settings::DEFAULT_ENV_PREFIX;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== Config Store: Basic Usage ===\n");

    let settings = match StoreSettings::from_env(DEFAULT_ENV_PREFIX)? {
        StoreSettings::Memory => StoreSettings::YamlDir {
            path: std::env::temp_dir().join("cfgstore-demo"),
        },
        other => other,
    };
    println!("Using store settings: {:?}\n", settings);

    let repository = DefaultConfigRepository::from_settings(&settings)?;
    let factory = ConfigFactory::new();

    // Example 1: A root config
    println!("--- Example 1: Root Config ---");
    let base = factory.create_root("base", [("timeout", "30"), ("retries", "3")])?;
    match repository.insert(base) {
        Ok(config) => println!("✓ Inserted '{}' (revision {})", config.name(), config.revision()),
        Err(ConfigError::DuplicateKey { name }) => println!("✗ '{}' already stored", name),
        Err(e) => return Err(e),
    }
    println!();

    // Example 2: A child config; blank parents and properties are dropped
    println!("--- Example 2: Child Config ---");
    let web = factory.create("web", ["base", " "], [("port", "8080"), ("", "ignored")])?;
    println!("  parents: {:?}", web.parents());
    println!("  properties: {:?}", web.properties());
    match repository.insert(web) {
        Ok(config) => println!("✓ Inserted '{}'", config.name()),
        Err(ConfigError::DuplicateKey { name }) => println!("✗ '{}' already stored", name),
        Err(e) => return Err(e),
    }
    println!();

    // Example 3: Missing parents are rejected
    println!("--- Example 3: Missing Parent ---");
    let orphan = factory.create("orphan", ["does-not-exist"], [("k", "v")])?;
    match repository.insert(orphan) {
        Ok(_) => println!("✗ Unexpectedly inserted 'orphan'"),
        Err(e) => println!("✓ Rejected: {}", e),
    }
    println!("  'orphan' exists: {}\n", repository.exists("orphan")?);

    // Example 4: Read a config with its parents
    println!("--- Example 4: Config With Parents ---");
    for (name, config) in repository.find_config_with_parents("web")? {
        println!("  {} -> {:?}", name, config.properties());
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
