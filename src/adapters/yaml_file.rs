// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file document store adapter.
//!
//! This module provides a store that keeps each config document in its own
//! `<name>.yaml` file inside a directory.

use crate::domain::{ConfigDocument, ConfigError, Filter, Result};
use crate::ports::DocumentStore;
use directories::ProjectDirs;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Maximum allowed size of a single document file (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const STORE_NAME: &str = "yaml-file";
const EXTENSION: &str = "yaml";

/// Document store adapter backed by a directory of YAML files.
///
/// Each document is written to a temporary file in the store directory and then
/// moved into place, so readers only ever see complete documents. Inserts move the
/// file without replacing an existing one, so the file system rejects a second
/// insert of the same name even across processes.
///
/// Config names used with this store must be usable as file names: they may not
/// contain path separators or NUL and may not start with a dot. On case-insensitive
/// file systems names differing only in case map to the same file; the second
/// insert fails with `DuplicateKey` and reading it back fails with `ParseError`.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgstore::adapters::YamlFileStore;
///
/// // Store documents in a specific directory
/// let store = YamlFileStore::open("/var/lib/myapp/configs").unwrap();
///
/// // Store documents in the default OS data location
/// let store = YamlFileStore::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    /// Directory holding one file per document
    directory: PathBuf,
}

impl YamlFileStore {
    /// Opens a store in the given directory, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let directory = path.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|e| ConfigError::StoreError {
            store_name: STORE_NAME.to_string(),
            message: format!("Failed to create store directory: {}", directory.display()),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { directory })
    }

    /// Opens a store in the default OS-appropriate data directory.
    ///
    /// This method uses the `directories` crate to determine the data directory
    /// for the application and stores documents in its `configs` subdirectory.
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::store(STORE_NAME, "Failed to determine project directories")
        })?;

        Self::open(proj_dirs.data_dir().join("configs"))
    }

    /// Returns the directory holding the document files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Validates a document name so it maps to exactly one file in the directory.
    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\', '\0']) {
            return Err(ConfigError::store(
                STORE_NAME,
                format!("Config name '{}' cannot be used as a file name", name),
            ));
        }
        Ok(())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        Self::validate_name(name)?;
        Ok(self.directory.join(format!("{}.{}", name, EXTENSION)))
    }

    /// Lists the names of all stored documents.
    fn stored_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| ConfigError::StoreError {
            store_name: STORE_NAME.to_string(),
            message: format!("Failed to list store directory: {}", self.directory.display()),
            source: Some(Box::new(e)),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Names matching the filter that have a document file.
    fn matching_names(&self, filter: &Filter) -> Result<Vec<String>> {
        match filter {
            Filter::All => self.stored_names(),
            Filter::Name(name) => Ok(if self.has_document(name)? {
                vec![name.clone()]
            } else {
                Vec::new()
            }),
            Filter::NameIn(names) => {
                let mut found = Vec::new();
                for name in names {
                    if self.has_document(name)? {
                        found.push(name.clone());
                    }
                }
                Ok(found)
            }
        }
    }

    fn has_document(&self, name: &str) -> Result<bool> {
        // Names that cannot be file names cannot have been stored.
        let Ok(path) = self.path_for(name) else {
            return Ok(false);
        };

        match fs::metadata(&path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ConfigError::StoreError {
                store_name: STORE_NAME.to_string(),
                message: format!("Failed to check document '{}'", name),
                source: Some(Box::new(e)),
            }),
        }
    }

    fn read_document(&self, name: &str) -> Result<ConfigDocument> {
        let path = self.path_for(name)?;

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(&path).map_err(|e| ConfigError::StoreError {
            store_name: STORE_NAME.to_string(),
            message: format!("Failed to read metadata of document '{}'", name),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_YAML_FILE_SIZE {
            return Err(ConfigError::store(
                STORE_NAME,
                format!(
                    "Document '{}' too large: {} bytes (max {} bytes)",
                    name,
                    metadata.len(),
                    MAX_YAML_FILE_SIZE
                ),
            ));
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::StoreError {
            store_name: STORE_NAME.to_string(),
            message: format!("Failed to read document '{}'", name),
            source: Some(Box::new(e)),
        })?;

        let document: ConfigDocument =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML document '{}': {}", name, e),
                source: Some(Box::new(e)),
            })?;

        if document.name != name {
            return Err(ConfigError::ParseError {
                message: format!(
                    "File for document '{}' holds document '{}'",
                    name, document.name
                ),
                source: None,
            });
        }
        Ok(document)
    }

    /// Writes the encoded document to a synced temporary file in the store directory.
    fn write_temp(&self, document: &ConfigDocument) -> Result<NamedTempFile> {
        let content = Self::encode(document)?;
        let write_error = |e: std::io::Error| ConfigError::StoreError {
            store_name: STORE_NAME.to_string(),
            message: format!("Failed to write document '{}'", document.name),
            source: Some(Box::new(e)),
        };

        let mut file = NamedTempFile::new_in(&self.directory).map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        Ok(file)
    }

    fn encode(document: &ConfigDocument) -> Result<String> {
        serde_yaml::to_string(document).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to encode document '{}': {}", document.name, e),
            source: Some(Box::new(e)),
        })
    }
}

impl DocumentStore for YamlFileStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn count(&self, filter: &Filter) -> Result<u64> {
        Ok(self.matching_names(filter)?.len() as u64)
    }

    fn find_one(&self, filter: &Filter) -> Result<Option<ConfigDocument>> {
        match self.matching_names(filter)?.first() {
            Some(name) => self.read_document(name).map(Some),
            None => Ok(None),
        }
    }

    fn find_many(&self, filter: &Filter) -> Result<Vec<ConfigDocument>> {
        self.matching_names(filter)?
            .iter()
            .map(|name| self.read_document(name))
            .collect()
    }

    fn insert(&self, document: ConfigDocument) -> Result<()> {
        let path = self.path_for(&document.name)?;
        let file = self.write_temp(&document)?;

        // The temporary file is removed when the persist error is dropped.
        match file.persist_noclobber(&path) {
            Ok(_) => {}
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                return Err(ConfigError::DuplicateKey {
                    name: document.name,
                });
            }
            Err(e) => {
                return Err(ConfigError::StoreError {
                    store_name: STORE_NAME.to_string(),
                    message: format!("Failed to create document '{}'", document.name),
                    source: Some(Box::new(e.error)),
                });
            }
        }

        tracing::debug!("Inserted document '{}' into {}", document.name, path.display());
        Ok(())
    }

    fn save(&self, document: ConfigDocument) -> Result<()> {
        let path = self.path_for(&document.name)?;
        let file = self.write_temp(&document)?;

        file.persist(&path).map_err(|e| ConfigError::StoreError {
            store_name: STORE_NAME.to_string(),
            message: format!("Failed to write document '{}'", document.name),
            source: Some(Box::new(e.error)),
        })?;
        tracing::debug!("Saved document '{}' into {}", document.name, path.display());
        Ok(())
    }
}
