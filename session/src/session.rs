//! The session value views render from.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Session` is a snapshot: the store owns the authoritative copy and hands
//! clones to listeners and the route guard. Fields are private so the
//! authenticated flag cannot drift from the identity.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::error::AuthError;
use crate::identity::Identity;

/// Who, if anyone, is signed in, plus in-flight and error status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    loading: bool,
    error: Option<AuthError>,
}

impl Default for Session {
    /// The process-start state: nothing restored yet.
    fn default() -> Self {
        Self::starting()
    }
}

impl Session {
    /// Empty session awaiting restore.
    #[must_use]
    pub fn starting() -> Self {
        Self { identity: None, loading: true, error: None }
    }

    /// Empty, settled session.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { identity: None, loading: false, error: None }
    }

    /// Settled session for `identity`.
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self { identity: Some(identity), loading: false, error: None }
    }

    /// Empty, settled session carrying `error`.
    #[must_use]
    pub fn failed(error: AuthError) -> Self {
        Self { identity: None, loading: false, error: Some(error) }
    }

    /// Same identity, marked in flight with the error cleared.
    #[must_use]
    pub(crate) fn pending(&self) -> Self {
        Self { identity: self.identity.clone(), loading: true, error: None }
    }

    /// Same identity, settled with `error`.
    #[must_use]
    pub(crate) fn settled_with(&self, error: AuthError) -> Self {
        Self { identity: self.identity.clone(), loading: false, error: Some(error) }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<AuthError> {
        self.error
    }
}
