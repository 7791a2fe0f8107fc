//! Pluggable key-value persistence.
//!
//! The browser build of ArtVista keeps its session and cart records in
//! `localStorage`. This module abstracts that capability behind
//! [`KeyValueStore`] so the same service logic runs against an in-memory
//! store in tests and a file-backed store in production.
//!
//! Records are JSON documents under fixed keys (see [`keys`]). Reads are
//! defensive: a record that fails to deserialize is purged and replaced by
//! the caller's default, never surfaced as an error. Writes are
//! best-effort: a failed write is logged and the in-memory state remains
//! authoritative.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Fixed record keys.
///
/// Session and cart own disjoint keys; neither record knows about the
/// other.
pub mod keys {
    /// Key for the serialized current identity. Absence means anonymous.
    pub const SESSION: &str = "artvista_user";

    /// Key for the serialized cart line items. Absence means empty cart.
    pub const CART: &str = "art_cart";
}

/// Errors that can occur inside a storage backend.
///
/// These never escape the service layer; they exist so backends can report
/// what went wrong to the defensive helpers below.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (file store only).
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A key that cannot be mapped to a storage location.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A durable string-to-string store.
///
/// Implementations must tolerate concurrent readers; there is at most one
/// logical writer per key in this design.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the record under `key`. Absent keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and deserialize the record under `key`, resetting on any problem.
///
/// A missing record yields the default. A malformed record is purged from
/// the store and also yields the default; the caller never sees the
/// corruption.
pub fn load_or_reset<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, error = %err, "storage read failed, using default");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "corrupt record purged, using default");
            purge(store, key);
            T::default()
        }
    }
}

/// Serialize `value` and write it under `key`, best-effort.
pub fn persist<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(key, error = %err, "record serialization failed, skipping write");
            return;
        }
    };

    if let Err(err) = store.set(key, &raw) {
        warn!(key, error = %err, "storage write failed, in-memory state kept");
    }
}

/// Delete the record under `key`, best-effort.
pub fn purge(store: &dyn KeyValueStore, key: &str) {
    if let Err(err) = store.remove(key) {
        warn!(key, error = %err, "storage delete failed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_reset_missing_key() {
        let store = MemoryStore::new();
        let value: Vec<String> = load_or_reset(&store, "absent");
        assert!(value.is_empty());
    }

    #[test]
    fn test_load_or_reset_roundtrip() {
        let store = MemoryStore::new();
        persist(&store, "list", &vec!["a".to_owned(), "b".to_owned()]);

        let value: Vec<String> = load_or_reset(&store, "list");
        assert_eq!(value, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_load_or_reset_purges_corrupt_record() {
        let store = MemoryStore::new();
        store.set("list", "{not json").unwrap();

        let value: Vec<String> = load_or_reset(&store, "list");
        assert!(value.is_empty());
        // The corrupt entry is gone, not just skipped.
        assert_eq!(store.get("list").unwrap(), None);
    }
}
