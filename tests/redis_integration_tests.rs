// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Redis store using Docker containers.

mod common;

#[cfg(feature = "redis")]
mod redis_tests {
    use cfgstore::prelude::*;
    use std::sync::Arc;
    use testcontainers::{core::WaitFor, runners::AsyncRunner, GenericImage, ImageExt};

    use crate::common as docker_helpers;

    /// Helper to set up a Redis container and a repository on top of it.
    async fn setup_redis_test() -> Option<(
        testcontainers::ContainerAsync<GenericImage>,
        String,
        String,
        DefaultConfigRepository,
    )> {
        if !docker_helpers::is_docker_available() {
            docker_helpers::print_docker_unavailable_warning("Redis integration test");
            return None;
        }

        let redis_image = GenericImage::new("redis", "7-alpine")
            .with_exposed_port(6379.into())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"));

        let container = redis_image.start().await.ok()?;
        let port = container.get_host_port_ipv4(6379).await.ok()?;

        let url = format!("redis://127.0.0.1:{}", port);

        // Give Redis a moment to start up
        tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;

        let namespace = docker_helpers::random_name("configs");
        let store = RedisStore::new(&url, &namespace).ok()?;
        let repository = DefaultConfigRepository::new(Arc::new(store));

        Some((container, url, namespace, repository))
    }

    #[tokio::test]
    async fn test_redis_end_to_end() {
        docker_helpers::init_tracing();
        let Some((_container, _url, _namespace, repository)) = setup_redis_test().await else {
            return;
        };
        let factory = docker_helpers::fixed_factory();

        repository
            .insert(factory.create_root("a", [("k1", "v1")]).unwrap())
            .unwrap();
        assert!(repository.exists("a").unwrap());

        let b = factory.create("b", ["a"], [("k2", "v2")]).unwrap();
        repository.insert(b.clone()).unwrap();
        assert_eq!(repository.find_config("b").unwrap(), Some(b));

        let family = repository.find_config_with_parents("b").unwrap();
        assert_eq!(family.len(), 2);
        assert_eq!(family["a"].property("k1"), Some("v1"));

        let orphan = factory.create("c", ["missing"], [("k3", "v3")]).unwrap();
        assert!(matches!(
            repository.insert(orphan),
            Err(ConfigError::IntegrityViolation { .. })
        ));
        assert!(!repository.exists("c").unwrap());

        let filter = Filter::NameIn(["a".to_string(), "b".to_string(), "c".to_string()].into());
        assert_eq!(repository.store().count(&filter).unwrap(), 2);
        assert_eq!(repository.store().count(&Filter::NameIn(Default::default())).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_redis_duplicate_insert() {
        let Some((_container, _url, _namespace, repository)) = setup_redis_test().await else {
            return;
        };
        let factory = docker_helpers::fixed_factory();

        repository
            .insert(factory.create_root("dup", [("k", "first")]).unwrap())
            .unwrap();
        let result = repository.insert(factory.create_root("dup", [("k", "second")]).unwrap());
        assert!(matches!(result, Err(ConfigError::DuplicateKey { .. })));

        let stored = repository.find_config("dup").unwrap().unwrap();
        assert_eq!(stored.property("k"), Some("first"));
    }

    #[tokio::test]
    async fn test_redis_removed_parent_is_detected() {
        let Some((_container, url, namespace, repository)) = setup_redis_test().await else {
            return;
        };
        let factory = docker_helpers::fixed_factory();

        repository
            .insert(factory.create_root("p", [("k", "v")]).unwrap())
            .unwrap();
        repository
            .insert(factory.create("q", ["p"], [("k", "v")]).unwrap())
            .unwrap();

        let client = redis::Client::open(url.as_str()).unwrap();
        let mut conn = client.get_connection().unwrap();
        let _: () = redis::cmd("HDEL")
            .arg(&namespace)
            .arg("p")
            .query(&mut conn)
            .unwrap();

        assert!(matches!(
            repository.find_config_with_parents("q"),
            Err(ConfigError::InvariantViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_redis_settings() {
        let Some((_container, url, _namespace, _repository)) = setup_redis_test().await else {
            return;
        };

        let settings = StoreSettings::Redis {
            url,
            namespace: "settings:configs".to_string(),
        };
        let repository = DefaultConfigRepository::from_settings(&settings).unwrap();
        repository
            .insert(docker_helpers::fixed_factory().create_root("s", [("k", "v")]).unwrap())
            .unwrap();
        assert_eq!(repository.store().count(&Filter::All).unwrap(), 1);
    }
}
