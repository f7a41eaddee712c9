// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redis document store adapter.
//!
//! This module provides a store that keeps config documents in a single Redis
//! hash, one JSON-encoded field per config name.

use crate::domain::{ConfigDocument, ConfigError, Filter, Result};
use crate::ports::DocumentStore;
use redis::{Client, Commands, Connection};
use std::collections::HashMap;

const STORE_NAME: &str = "redis";

/// Document store adapter for Redis.
///
/// All documents live in the hash named by `namespace`. Inserts use `HSETNX`,
/// which makes the uniqueness check and the write one atomic server-side step.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgstore::adapters::RedisStore;
///
/// let store = RedisStore::new("redis://localhost:6379", "myapp:configs").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RedisStore {
    /// Redis client
    client: Client,
    /// Name of the hash holding the documents
    namespace: String,
}

impl RedisStore {
    /// Validates namespace to prevent injection attacks
    fn validate_namespace(namespace: &str) -> Result<()> {
        // Disallow wildcard characters and other special Redis pattern characters
        if namespace.is_empty() || namespace.contains(['*', '?', '[', ']', '\\']) {
            return Err(ConfigError::store(
                STORE_NAME,
                "Namespace must be non-empty and free of * ? [ ] \\",
            ));
        }
        Ok(())
    }

    /// Creates a new Redis store with the given connection URL.
    ///
    /// No connection is made until the first operation.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., `"redis://localhost:6379"`)
    /// * `namespace` - Name of the hash that holds the documents
    pub fn new(url: &str, namespace: &str) -> Result<Self> {
        Self::validate_namespace(namespace)?;

        let client = Client::open(url).map_err(|e| ConfigError::StoreError {
            store_name: STORE_NAME.to_string(),
            message: format!("Failed to create Redis client: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            namespace: namespace.to_string(),
        })
    }

    /// Returns the name of the hash holding the documents.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Gets a connection to Redis.
    fn get_connection(&self) -> Result<Connection> {
        self.client
            .get_connection()
            .map_err(|e| Self::command_error("Failed to connect to Redis", e))
    }

    fn command_error(message: &str, e: redis::RedisError) -> ConfigError {
        ConfigError::StoreError {
            store_name: STORE_NAME.to_string(),
            message: format!("{}: {}", message, e),
            source: Some(Box::new(e)),
        }
    }

    fn encode(document: &ConfigDocument) -> Result<String> {
        serde_json::to_string(document).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to encode document '{}': {}", document.name, e),
            source: Some(Box::new(e)),
        })
    }

    fn decode(name: &str, raw: &str) -> Result<ConfigDocument> {
        serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse JSON document '{}': {}", name, e),
            source: Some(Box::new(e)),
        })
    }

    /// Fetches the raw documents matching the filter, in name order.
    fn fetch(&self, filter: &Filter) -> Result<Vec<(String, String)>> {
        let mut conn = self.get_connection()?;

        let mut found: Vec<(String, String)> = match filter {
            Filter::All => {
                let all: HashMap<String, String> = conn
                    .hgetall(&self.namespace)
                    .map_err(|e| Self::command_error("Failed to fetch hash from Redis", e))?;
                all.into_iter().collect()
            }
            Filter::Name(name) => {
                let raw: Option<String> = conn
                    .hget(&self.namespace, name)
                    .map_err(|e| Self::command_error("Failed to fetch document from Redis", e))?;
                raw.map(|raw| (name.clone(), raw)).into_iter().collect()
            }
            Filter::NameIn(names) if names.is_empty() => Vec::new(),
            Filter::NameIn(names) => {
                let names: Vec<&String> = names.iter().collect();
                let raw: Vec<Option<String>> = redis::cmd("HMGET")
                    .arg(&self.namespace)
                    .arg(&names)
                    .query(&mut conn)
                    .map_err(|e| Self::command_error("Failed to fetch documents from Redis", e))?;
                names
                    .into_iter()
                    .zip(raw)
                    .filter_map(|(name, raw)| raw.map(|raw| (name.clone(), raw)))
                    .collect()
            }
        };

        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }
}

impl DocumentStore for RedisStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn count(&self, filter: &Filter) -> Result<u64> {
        match filter {
            Filter::All => {
                let mut conn = self.get_connection()?;
                conn.hlen(&self.namespace)
                    .map_err(|e| Self::command_error("Failed to count documents in Redis", e))
            }
            Filter::Name(name) => {
                let mut conn = self.get_connection()?;
                let exists: bool = conn
                    .hexists(&self.namespace, name)
                    .map_err(|e| Self::command_error("Failed to check document in Redis", e))?;
                Ok(u64::from(exists))
            }
            Filter::NameIn(names) if names.is_empty() => Ok(0),
            Filter::NameIn(names) => {
                let mut conn = self.get_connection()?;
                let mut pipe = redis::pipe();
                for name in names {
                    pipe.hexists(&self.namespace, name);
                }
                let found: Vec<bool> = pipe
                    .query(&mut conn)
                    .map_err(|e| Self::command_error("Failed to check documents in Redis", e))?;
                Ok(found.into_iter().filter(|exists| *exists).count() as u64)
            }
        }
    }

    fn find_one(&self, filter: &Filter) -> Result<Option<ConfigDocument>> {
        match self.fetch(filter)?.into_iter().next() {
            Some((name, raw)) => Self::decode(&name, &raw).map(Some),
            None => Ok(None),
        }
    }

    fn find_many(&self, filter: &Filter) -> Result<Vec<ConfigDocument>> {
        self.fetch(filter)?
            .iter()
            .map(|(name, raw)| Self::decode(name, raw))
            .collect()
    }

    fn insert(&self, document: ConfigDocument) -> Result<()> {
        let raw = Self::encode(&document)?;
        let mut conn = self.get_connection()?;

        let added: bool = conn
            .hset_nx(&self.namespace, &document.name, raw)
            .map_err(|e| Self::command_error("Failed to insert document into Redis", e))?;
        if !added {
            return Err(ConfigError::DuplicateKey {
                name: document.name,
            });
        }

        tracing::debug!(
            "Inserted document '{}' into Redis hash '{}'",
            document.name,
            self.namespace
        );
        Ok(())
    }

    fn save(&self, document: ConfigDocument) -> Result<()> {
        let raw = Self::encode(&document)?;
        let mut conn = self.get_connection()?;

        let _: () = conn
            .hset(&self.namespace, &document.name, raw)
            .map_err(|e| Self::command_error("Failed to save document into Redis", e))?;

        tracing::debug!(
            "Saved document '{}' into Redis hash '{}'",
            document.name,
            self.namespace
        );
        Ok(())
    }
}
