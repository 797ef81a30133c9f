//! Auth-session context for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The `SessionStore` is the only
//! writer; this context mirrors its snapshots into a signal so the guard
//! re-evaluates by subscription rather than polling.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use leptos::prelude::*;
use session::{MockDirectory, Role, Session, SessionConfig, SessionStore, WithLatency};

use crate::util::local_storage::BrowserStorage;
use crate::util::timers::{BrowserTimers, sleep_fn};

/// Build the session store backed by `localStorage`, browser timers, and
/// the mock directory behind simulated latency.
pub fn browser_store(config: SessionConfig) -> SessionStore {
    let directory = MockDirectory::new(config.demo_password.clone());
    let backend = WithLatency::new(directory, config.latency, sleep_fn());
    SessionStore::new(config, Rc::new(backend), Rc::new(BrowserStorage), Rc::new(BrowserTimers))
}

/// Handle provided through context: a reactive session mirror plus the store.
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
    store: StoredValue<SessionStore, LocalStorage>,
}

impl AuthContext {
    /// Wrap `store` and keep a signal in sync with every session write.
    pub fn new(store: SessionStore) -> Self {
        let session = RwSignal::new(store.session());
        store.subscribe(move |next| session.set(next.clone()));
        Self { session, store: StoredValue::new_local(store) }
    }

    /// Current session, tracked.
    pub fn current(&self) -> Session {
        self.session.get()
    }

    /// Current session without subscribing the caller.
    pub fn current_untracked(&self) -> Session {
        self.session.get_untracked()
    }

    /// Shared store handle for async operations.
    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }

    pub fn restore(&self) {
        self.store.with_value(SessionStore::restore);
    }

    pub fn logout(&self) {
        self.store.with_value(SessionStore::logout);
    }

    /// Start a login; the outcome arrives through the session signal.
    pub fn login(&self, email: String, password: String) {
        let store = self.store();
        leptos::task::spawn_local(async move {
            store.login(&email, &password).await;
        });
    }

    /// Start a registration; the outcome arrives through the session signal.
    pub fn register(&self, form: RegistrationForm) {
        let store = self.store();
        leptos::task::spawn_local(async move {
            store.register(&form.name, &form.email, &form.password, form.role).await;
        });
    }
}

/// Read the auth context provided by [`crate::app::App`].
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Validated sign-up form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Trim and check sign-in fields.
///
/// # Errors
///
/// Returns the message to show when either field is blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Trim and check sign-up fields.
///
/// # Errors
///
/// Returns the first problem found, worded for display.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    role: &str,
) -> Result<RegistrationForm, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in every field.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    let role = role.parse::<Role>().map_err(|_| "Choose a role.")?;
    Ok(RegistrationForm { name: name.to_owned(), email: email.to_owned(), password: password.to_owned(), role })
}
