//! The process-wide session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Exactly one `SessionStore` is built at application start and shared by
//! handle (it is a cheap `Rc` clone). Its operations are the only writers of
//! the session. Views and the route guard read snapshots and re-evaluate when
//! a subscribed listener is notified.
//!
//! CONCURRENCY
//! ===========
//! Single-threaded. `login` and `register` suspend at the backend call; no
//! `RefCell` borrow is held across that await or while listeners run, so a
//! listener may call straight back into the store.
//!
//! Every session-mutating call bumps a generation counter. A completion or an
//! idle timer tagged with an older generation is dropped, which makes the last
//! *started* call win rather than the last one to finish.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::backend::{IdentityBackend, Registration};
use crate::config::SessionConfig;
use crate::error::AuthError;
use crate::identity::{Identity, Role};
use crate::session::Session;
use crate::storage::{self, SessionStorage, StoredRecord};
use crate::timer::IdleScheduler;

type Listener = Rc<dyn Fn(&Session)>;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

struct State {
    session: Session,
    generation: u64,
}

struct Inner {
    config: SessionConfig,
    backend: Rc<dyn IdentityBackend>,
    storage: Rc<dyn SessionStorage>,
    timers: Rc<dyn IdleScheduler>,
    state: RefCell<State>,
    listeners: RefCell<Vec<(Subscription, Listener)>>,
    next_listener: Cell<u64>,
}

/// Owner of the authoritative [`Session`].
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    /// Build the store in its process-start state (`loading`, no identity).
    #[must_use]
    pub fn new(
        config: SessionConfig,
        backend: Rc<dyn IdentityBackend>,
        storage: Rc<dyn SessionStorage>,
        timers: Rc<dyn IdleScheduler>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                backend,
                storage,
                timers,
                state: RefCell::new(State { session: Session::starting(), generation: 0 }),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.inner.state.borrow().session.clone()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.inner.state.borrow().session.identity().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().session.is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().session.is_loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<AuthError> {
        self.inner.state.borrow().session.error()
    }

    /// Call `listener` with the new session after every write.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        let handle = Subscription(id);
        self.inner.listeners.borrow_mut().push((handle, Rc::new(listener)));
        handle
    }

    /// Drop a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, handle: Subscription) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(h, _)| *h != handle);
        listeners.len() != before
    }

    /// Rebuild the session from the persisted record.
    ///
    /// A corrupt record is erased and reported as [`AuthError::InvalidSession`].
    pub fn restore(&self) {
        let generation = self.bump();
        let key = &self.inner.config.storage_key;
        let record = storage::read_record(self.inner.storage.as_ref(), key).unwrap_or_else(|e| {
            log::warn!("session restore could not read storage: {e}");
            StoredRecord::Missing
        });
        match record {
            StoredRecord::Missing => {
                self.finish(generation, |_| Session::signed_out());
            }
            StoredRecord::Valid(identity) => {
                log::info!("restored session for {}", identity.email);
                if self.finish(generation, |_| Session::signed_in(identity)) {
                    self.arm_idle(generation);
                }
            }
            StoredRecord::Corrupt => {
                log::warn!("discarding unreadable session record");
                self.erase_record();
                self.finish(generation, |_| Session::failed(AuthError::InvalidSession));
            }
        }
    }

    /// Verify credentials and sign in.
    pub async fn login(&self, email: &str, password: &str) {
        let generation = self.begin();
        let backend = Rc::clone(&self.inner.backend);
        match backend.authenticate(email, password).await {
            Ok(identity) => self.complete_sign_in(generation, identity),
            Err(err) => {
                log::info!("login rejected for {email}: {err}");
                self.finish(generation, |_| Session::failed(err));
            }
        }
    }

    /// Create an account and sign in as it.
    ///
    /// On failure any identity held before the call is left in place.
    pub async fn register(&self, name: &str, email: &str, password: &str, role: Role) {
        let generation = self.begin();
        let registration = Registration {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            role,
        };
        let backend = Rc::clone(&self.inner.backend);
        match backend.register(registration).await {
            Ok(identity) => self.complete_sign_in(generation, identity),
            Err(err) => {
                log::info!("registration rejected for {email}: {err}");
                // The call outdated the idle timer of a kept identity; re-arm it.
                if self.finish(generation, |current| current.settled_with(err)) && self.is_authenticated() {
                    self.arm_idle(generation);
                }
            }
        }
    }

    /// Erase the persisted record and reset to the signed-out state.
    pub fn logout(&self) {
        let generation = self.bump();
        self.erase_record();
        self.finish(generation, |_| Session::signed_out());
    }

    /// Force a logout if nothing has touched the session since `generation`.
    fn expire_idle(&self, generation: u64) -> bool {
        if self.inner.state.borrow().generation != generation {
            log::debug!("idle timer from generation {generation} is stale");
            return false;
        }
        log::info!("idle timeout reached, signing out");
        self.logout();
        true
    }

    fn complete_sign_in(&self, generation: u64, identity: Identity) {
        if !self.is_current(generation) {
            log::debug!("dropping superseded sign-in for {}", identity.email);
            return;
        }
        if let Err(e) = storage::write_record(self.inner.storage.as_ref(), &self.inner.config.storage_key, &identity) {
            log::warn!("failed to persist session: {e}");
        }
        log::info!("signed in as {} ({})", identity.email, identity.role);
        self.finish(generation, |_| Session::signed_in(identity));
        self.arm_idle(generation);
    }

    fn arm_idle(&self, generation: u64) {
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        self.inner.timers.schedule(
            self.inner.config.idle_timeout,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    SessionStore { inner }.expire_idle(generation);
                }
            }),
        );
    }

    fn erase_record(&self) {
        if let Err(e) = self.inner.storage.remove(&self.inner.config.storage_key) {
            log::warn!("failed to erase session record: {e}");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.state.borrow().generation == generation
    }

    fn bump(&self) -> u64 {
        let mut state = self.inner.state.borrow_mut();
        state.generation += 1;
        state.generation
    }

    /// Start an async operation: new generation, `loading` on, error cleared.
    fn begin(&self) -> u64 {
        let generation = self.bump();
        self.finish(generation, Session::pending);
        generation
    }

    /// Write the session derived from the current one, then notify.
    ///
    /// Returns `false` without writing when `generation` is stale.
    fn finish(&self, generation: u64, next: impl FnOnce(&Session) -> Session) -> bool {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            if state.generation != generation {
                log::debug!("dropping stale completion from generation {generation}");
                return false;
            }
            let updated = next(&state.session);
            state.session = updated;
            state.session.clone()
        };
        let listeners: Vec<Listener> =
            self.inner.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(&snapshot);
        }
        true
    }
}
