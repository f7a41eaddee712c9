// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the default repository over the in-memory store.

mod common;

use cfgstore::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_end_to_end_scenario() {
    common::init_tracing();
    let repository = DefaultConfigRepository::in_memory();
    let factory = common::fixed_factory();

    let a = factory.create_root("a", [("k1", "v1")]).unwrap();
    repository.insert(a.clone()).unwrap();
    assert!(repository.exists("a").unwrap());

    let b = factory.create("b", ["a"], [("k2", "v2")]).unwrap();
    repository.insert(b).unwrap();

    let stored_b = repository.find_config("b").unwrap().unwrap();
    assert_eq!(stored_b.parents().len(), 1);
    assert!(stored_b.parents().contains("a"));
    assert_eq!(stored_b.property("k2"), Some("v2"));

    let family = repository.find_config_with_parents("b").unwrap();
    assert_eq!(family.len(), 2);
    assert_eq!(family.get("a"), Some(&a));
    assert_eq!(family.get("b"), Some(&stored_b));

    let c = factory.create("c", ["missing"], [("k3", "v3")]).unwrap();
    let err = repository.insert(c).unwrap_err();
    assert!(matches!(err, ConfigError::IntegrityViolation { .. }));
    assert!(!repository.exists("c").unwrap());
}

#[test]
fn test_stored_config_keeps_all_fields() {
    let repository = DefaultConfigRepository::in_memory();
    let factory = common::fixed_factory();

    repository
        .insert(factory.create_root("base", [("timeout", "30")]).unwrap())
        .unwrap();
    let original = factory
        .create("web", ["base"], [("port", "8080"), ("host", "0.0.0.0")])
        .unwrap();
    repository.insert(original.clone()).unwrap();

    let stored = repository.find_config("web").unwrap().unwrap();
    assert_eq!(stored, original);
    assert_eq!(stored.revision(), 1);
    assert_eq!(stored.created_at(), stored.last_modified_at());
    assert_eq!(stored.config_type(), ConfigType::Text);
    assert!(stored.children().is_empty());
}

#[test]
fn test_duplicate_insert_leaves_original_untouched() {
    let repository = DefaultConfigRepository::in_memory();
    let factory = common::fixed_factory();

    repository
        .insert(factory.create_root("a", [("k", "first")]).unwrap())
        .unwrap();
    let err = repository
        .insert(factory.create_root("a", [("k", "second")]).unwrap())
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateKey { ref name } if name == "a"));

    let stored = repository.find_config("a").unwrap().unwrap();
    assert_eq!(stored.property("k"), Some("first"));
}

#[test]
fn test_multiple_parents() {
    let repository = DefaultConfigRepository::in_memory();
    let factory = common::fixed_factory();

    for name in ["p1", "p2", "p3"] {
        repository
            .insert(factory.create_root(name, [("from", name)]).unwrap())
            .unwrap();
    }
    repository
        .insert(factory.create("leaf", ["p1", "p2", "p3"], [("k", "v")]).unwrap())
        .unwrap();

    let family = repository.find_config_with_parents("leaf").unwrap();
    let names: Vec<&str> = family.keys().map(ConfigName::as_str).collect();
    assert_eq!(names, vec!["leaf", "p1", "p2", "p3"]);
    assert_eq!(family["p2"].property("from"), Some("p2"));
}

#[test]
fn test_duplicate_parent_names_count_once() {
    let repository = DefaultConfigRepository::in_memory();
    let factory = common::fixed_factory();

    repository
        .insert(factory.create_root("a", [("k", "v")]).unwrap())
        .unwrap();
    let config = factory.create("b", ["a", "a", " "], [("k", "v")]).unwrap();
    assert_eq!(config.parents().len(), 1);

    repository.insert(config).unwrap();
    assert_eq!(repository.find_config_with_parents("b").unwrap().len(), 2);
}

#[test]
fn test_missing_config_reads() {
    let repository = DefaultConfigRepository::in_memory();

    assert!(!repository.exists("nope").unwrap());
    assert!(repository.find_config("nope").unwrap().is_none());
    assert!(repository.find_config_with_parents("nope").unwrap().is_empty());
}

#[test]
fn test_repository_from_settings() {
    let repository = DefaultConfigRepository::from_settings(&StoreSettings::Memory).unwrap();
    assert_eq!(repository.store().name(), "memory");
}

#[test]
fn test_shared_store_between_repositories() {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
    let writer = DefaultConfigRepository::new(store.clone());
    let reader = DefaultConfigRepository::new(store);

    writer
        .insert(common::fixed_factory().create_root("shared", [("k", "v")]).unwrap())
        .unwrap();
    assert!(reader.exists("shared").unwrap());
}

#[test]
fn test_concurrent_inserts_of_same_name() {
    common::init_tracing();
    let repository = DefaultConfigRepository::in_memory();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let repository = repository.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                let value = i.to_string();
                let config = ConfigFactory::new()
                    .create_root("contested", [("writer", value.as_str())])
                    .unwrap();
                barrier.wait();
                repository.insert(config)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(ConfigError::DuplicateKey { .. })))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(duplicates, threads - 1);
    assert_eq!(repository.store().count(&Filter::All).unwrap(), 1);
}

#[test]
fn test_concurrent_children_of_one_parent() {
    let repository = DefaultConfigRepository::in_memory();
    let factory = ConfigFactory::new();
    repository
        .insert(factory.create_root("root", [("k", "v")]).unwrap())
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let repository = repository.clone();
            let factory = factory.clone();
            thread::spawn(move || {
                let name = format!("child-{}", i);
                repository
                    .insert(factory.create(&name, ["root"], [("index", name.as_str())])?)
                    .map(|_| name)
            })
        })
        .collect();

    for handle in handles {
        let name = handle.join().unwrap().unwrap();
        let family = repository.find_config_with_parents(&name).unwrap();
        assert_eq!(family.len(), 2);
        assert!(family.contains_key("root"));
    }
    assert_eq!(repository.store().count(&Filter::All).unwrap(), 11);
}
