//! Identity backend port and the in-memory mock directory.
//!
//! ARCHITECTURE
//! ============
//! The store only sees [`IdentityBackend`]. The mock directory answers
//! immediately; [`WithLatency`] wraps any backend with an injected sleep so
//! each environment can supply its own timer (`gloo-timers` in the browser,
//! `tokio::time` in the CLI, nothing in tests).
//!
//! TRADE-OFFS
//! ==========
//! The mock accepts one shared password for every identity. It stands in for
//! a credential service and is not a policy anything else should copy.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

use crate::error::AuthError;
use crate::identity::{Identity, Role};

/// Sign-up request handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Credential verification and account creation.
#[async_trait(?Send)]
pub trait IdentityBackend {
    /// Resolve the identity for `email` if `password` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the email is unknown or
    /// the password is wrong.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Create an identity for `registration`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailInUse`] when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<Identity, AuthError>;
}

#[async_trait(?Send)]
impl<B: IdentityBackend + ?Sized> IdentityBackend for Rc<B> {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        (**self).authenticate(email, password).await
    }

    async fn register(&self, registration: Registration) -> Result<Identity, AuthError> {
        (**self).register(registration).await
    }
}

/// Hardcoded identity directory, one seeded account per role.
#[derive(Debug)]
pub struct MockDirectory {
    identities: RefCell<Vec<Identity>>,
    password: String,
    next_id: Cell<u64>,
}

impl MockDirectory {
    /// Seeded directory accepting `password` for every identity.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self::with_identities(seed_identities(), password)
    }

    /// Directory over `identities`. Fresh ids continue after the highest numeric id.
    #[must_use]
    pub fn with_identities(identities: Vec<Identity>, password: impl Into<String>) -> Self {
        let highest = identities.iter().filter_map(|i| i.id.parse::<u64>().ok()).max().unwrap_or(0);
        Self {
            identities: RefCell::new(identities),
            password: password.into(),
            next_id: Cell::new(highest + 1),
        }
    }

    /// Snapshot of every identity currently in the directory.
    #[must_use]
    pub fn identities(&self) -> Vec<Identity> {
        self.identities.borrow().clone()
    }

    fn find_by_email(&self, email: &str) -> Option<Identity> {
        self.identities.borrow().iter().find(|i| i.email == email).cloned()
    }

    fn issue_id(&self) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id.to_string()
    }
}

#[async_trait(?Send)]
impl IdentityBackend for MockDirectory {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        match self.find_by_email(email) {
            Some(identity) if password == self.password => Ok(identity),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn register(&self, registration: Registration) -> Result<Identity, AuthError> {
        if self.find_by_email(&registration.email).is_some() {
            return Err(AuthError::EmailInUse);
        }
        let identity = Identity {
            id: self.issue_id(),
            name: registration.name,
            role: registration.role,
            email: registration.email,
            avatar: None,
        };
        self.identities.borrow_mut().push(identity.clone());
        Ok(identity)
    }
}

/// The four accounts every mock directory starts with.
#[must_use]
pub fn seed_identities() -> Vec<Identity> {
    [
        ("1", "Public User", Role::Public, "public@example.com"),
        ("2", "Police Officer", Role::Police, "police@example.com"),
        ("3", "Hospital Staff", Role::Hospital, "hospital@example.com"),
        ("4", "Admin User", Role::Admin, "admin@example.com"),
    ]
    .into_iter()
    .map(|(id, name, role, email)| Identity {
        id: id.to_owned(),
        name: name.to_owned(),
        role,
        email: email.to_owned(),
        avatar: None,
    })
    .collect()
}

/// Injected timer future factory.
pub type SleepFn = Rc<dyn Fn(Duration) -> LocalBoxFuture<'static, ()>>;

/// Backend decorator that waits `delay` before every call.
pub struct WithLatency<B> {
    inner: B,
    delay: Duration,
    sleep: SleepFn,
}

impl<B> WithLatency<B> {
    #[must_use]
    pub fn new(inner: B, delay: Duration, sleep: SleepFn) -> Self {
        Self { inner, delay, sleep }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            (self.sleep)(self.delay).await;
        }
    }
}

#[async_trait(?Send)]
impl<B: IdentityBackend> IdentityBackend for WithLatency<B> {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.pause().await;
        self.inner.authenticate(email, password).await
    }

    async fn register(&self, registration: Registration) -> Result<Identity, AuthError> {
        self.pause().await;
        self.inner.register(registration).await
    }
}
