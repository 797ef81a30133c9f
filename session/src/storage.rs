//! Durable client-local storage for the persisted session record.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build backs this with `localStorage`, the CLI with a state
//! directory on disk. The record is plain JSON of an [`Identity`]; there is no
//! schema version, so anything that fails to parse is treated as corrupt.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;
use crate::identity::Identity;

/// String key/value store the session record lives in.
pub trait SessionStorage {
    /// Read the raw value for `key`, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage used by tests and as a fallback when nothing durable exists.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Outcome of reading the persisted session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredRecord {
    /// No record under the key.
    Missing,
    /// A record that parsed as an identity.
    Valid(Identity),
    /// A record exists but is not a valid identity.
    Corrupt,
}

/// Read and decode the record stored under `key`.
///
/// # Errors
///
/// Returns a [`StorageError`] only if the storage itself fails; parse
/// failures are reported as [`StoredRecord::Corrupt`].
pub fn read_record(storage: &dyn SessionStorage, key: &str) -> Result<StoredRecord, StorageError> {
    let Some(raw) = storage.load(key)? else {
        return Ok(StoredRecord::Missing);
    };
    Ok(match serde_json::from_str::<Identity>(&raw) {
        Ok(identity) => StoredRecord::Valid(identity),
        Err(e) => {
            log::debug!("persisted session under {key:?} did not parse: {e}");
            StoredRecord::Corrupt
        }
    })
}

/// Encode `identity` and store it under `key`.
///
/// # Errors
///
/// Returns a [`StorageError`] if encoding or the write fails.
pub fn write_record(storage: &dyn SessionStorage, key: &str, identity: &Identity) -> Result<(), StorageError> {
    let raw = serde_json::to_string(identity)?;
    storage.save(key, &raw)
}
