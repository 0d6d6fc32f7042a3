//! Persistent storage medium
//!
//! Named-resource storage for the shortcut registry and similar small
//! documents. Media can be absent at runtime (no card inserted); callers
//! are expected to check [`StorageMedium::available`] and degrade rather
//! than fail.

use std::collections::HashMap;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage medium unavailable")]
    Unavailable,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage I/O failed: {0}")]
    Io(String),
}

/// A medium holding small named resources.
///
/// Resources are read and rewritten whole; there is no partial update.
pub trait StorageMedium {
    /// Returns true while the medium is present and usable
    fn available(&self) -> bool;

    /// Returns true if the named resource exists
    fn exists(&self, resource: &str) -> bool;

    /// Reads a resource in full
    fn read(&self, resource: &str) -> Result<Vec<u8>, StorageError>;

    /// Replaces a resource in full, creating it if needed
    fn write(&mut self, resource: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// In-memory storage medium.
///
/// Backs tests and the host runtime's safe mode; can be constructed
/// "missing" to exercise the no-medium paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: HashMap<String, Vec<u8>>,
    present: bool,
}

impl MemoryStore {
    /// Creates an empty, present medium
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
            present: true,
        }
    }

    /// Creates a medium that reports itself unavailable
    pub fn missing() -> Self {
        Self {
            resources: HashMap::new(),
            present: false,
        }
    }
}

impl StorageMedium for MemoryStore {
    fn available(&self) -> bool {
        self.present
    }

    fn exists(&self, resource: &str) -> bool {
        self.present && self.resources.contains_key(resource)
    }

    fn read(&self, resource: &str) -> Result<Vec<u8>, StorageError> {
        if !self.present {
            return Err(StorageError::Unavailable);
        }
        self.resources
            .get(resource)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(resource.to_string()))
    }

    fn write(&mut self, resource: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if !self.present {
            return Err(StorageError::Unavailable);
        }
        self.resources.insert(resource.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_roundtrip() {
        let mut store = MemoryStore::new();
        store.write("apps.json", b"[]").unwrap();
        assert!(store.exists("apps.json"));
        assert_eq!(store.read("apps.json").unwrap(), b"[]");
    }

    #[test]
    fn test_missing_medium_rejects_everything() {
        let mut store = MemoryStore::missing();
        assert!(!store.available());
        assert!(!store.exists("apps.json"));
        assert!(matches!(
            store.read("apps.json"),
            Err(StorageError::Unavailable)
        ));
        assert!(matches!(
            store.write("apps.json", b"[]"),
            Err(StorageError::Unavailable)
        ));
    }

    #[test]
    fn test_read_absent_resource() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.read("nope.json"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_write_replaces_in_full() {
        let mut store = MemoryStore::new();
        store.write("apps.json", b"aaaa").unwrap();
        store.write("apps.json", b"b").unwrap();
        assert_eq!(store.read("apps.json").unwrap(), b"b");
    }
}
