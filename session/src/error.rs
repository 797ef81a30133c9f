//! Error types for session operations and storage adapters.
//!
//! ERROR HANDLING
//! ==============
//! `AuthError` never escapes the store as a `Result`; it is recorded on the
//! session so views can render it. `StorageError` is returned by storage
//! adapters and absorbed (logged) by the store.

/// User-facing failure recorded on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Email/password did not match any identity.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Registration used an email already present in the directory.
    #[error("Email already in use")]
    EmailInUse,
    /// A persisted session record existed but could not be parsed.
    #[error("Invalid stored session")]
    InvalidSession,
}

/// Failure reported by a [`crate::storage::SessionStorage`] adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store is not reachable (no window, storage disabled, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Reading or writing the backing store failed.
    #[error("storage i/o failed: {0}")]
    Io(String),
    /// The value could not be encoded for storage.
    #[error("failed to encode session record: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}
