use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;

use super::*;
use crate::backend::{MockDirectory, seed_identities};
use crate::config::DEMO_PASSWORD;
use crate::storage::MemoryStorage;
use crate::timer::ManualTimers;

const KEY: &str = "user";

struct Harness {
    store: SessionStore,
    storage: Rc<MemoryStorage>,
    timers: Rc<ManualTimers>,
}

fn harness() -> Harness {
    harness_with(Rc::new(MockDirectory::new(DEMO_PASSWORD)))
}

fn harness_with(backend: Rc<dyn IdentityBackend>) -> Harness {
    let storage = Rc::new(MemoryStorage::new());
    let timers = Rc::new(ManualTimers::new());
    let storage_port: Rc<dyn SessionStorage> = storage.clone();
    let timer_port: Rc<dyn IdleScheduler> = timers.clone();
    let store = SessionStore::new(SessionConfig::default(), backend, storage_port, timer_port);
    Harness { store, storage, timers }
}

fn seeded(role: Role) -> Identity {
    seed_identities().into_iter().find(|i| i.role == role).unwrap()
}

/// Backend whose calls block until the test releases them, in call order.
#[derive(Default)]
struct GatedBackend {
    gates: RefCell<VecDeque<oneshot::Receiver<Result<Identity, AuthError>>>>,
}

impl GatedBackend {
    fn gate(&self) -> oneshot::Sender<Result<Identity, AuthError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push_back(rx);
        tx
    }

    async fn next(&self) -> Result<Identity, AuthError> {
        let gate = self.gates.borrow_mut().pop_front().expect("no gate armed");
        gate.await.unwrap_or(Err(AuthError::InvalidCredentials))
    }
}

#[async_trait(?Send)]
impl IdentityBackend for GatedBackend {
    async fn authenticate(&self, _email: &str, _password: &str) -> Result<Identity, AuthError> {
        self.next().await
    }

    async fn register(&self, _registration: Registration) -> Result<Identity, AuthError> {
        self.next().await
    }
}

// =============================================================
// restore
// =============================================================

#[test]
fn new_store_is_loading_until_restored() {
    let h = harness();
    assert!(h.store.is_loading());
    assert!(!h.store.is_authenticated());
}

#[test]
fn restore_without_record_is_signed_out() {
    let h = harness();
    h.store.restore();
    assert_eq!(h.store.session(), Session::signed_out());
    assert_eq!(h.timers.pending(), 0);
}

#[test]
fn restore_with_valid_record_signs_in_and_arms_idle_timer() {
    let h = harness();
    storage::write_record(h.storage.as_ref(), KEY, &seeded(Role::Hospital)).unwrap();
    h.store.restore();
    assert_eq!(h.store.identity(), Some(seeded(Role::Hospital)));
    assert!(!h.store.is_loading());
    assert!(h.store.error().is_none());
    assert_eq!(h.timers.delays(), vec![Duration::from_secs(30 * 60)]);
}

#[test]
fn restore_with_corrupt_record_erases_it_and_reports_invalid_session() {
    let h = harness();
    h.storage.save(KEY, "{\"id\":").unwrap();
    h.store.restore();
    assert_eq!(h.store.session(), Session::failed(AuthError::InvalidSession));
    assert!(!h.storage.contains(KEY));

    h.store.restore();
    assert_eq!(h.store.session(), Session::signed_out());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_with_shared_password_succeeds_for_every_identity() {
    for identity in seed_identities() {
        let h = harness();
        h.store.restore();
        block_on(h.store.login(&identity.email, DEMO_PASSWORD));
        assert!(h.store.is_authenticated());
        assert_eq!(h.store.identity(), Some(identity.clone()));
        assert!(!h.store.is_loading());
        assert_eq!(storage::read_record(h.storage.as_ref(), KEY), Ok(StoredRecord::Valid(identity)));
    }
}

#[test]
fn login_with_wrong_password_fails_for_every_identity() {
    for identity in seed_identities() {
        let h = harness();
        h.store.restore();
        block_on(h.store.login(&identity.email, "wrong"));
        assert!(!h.store.is_authenticated());
        assert_eq!(h.store.error(), Some(AuthError::InvalidCredentials));
        assert!(!h.store.is_loading());
        assert!(!h.storage.contains(KEY));
    }
}

#[test]
fn failed_login_clears_previous_identity() {
    let h = harness();
    block_on(h.store.login("police@example.com", DEMO_PASSWORD));
    block_on(h.store.login("police@example.com", "nope"));
    assert!(h.store.identity().is_none());
    assert_eq!(h.store.error(), Some(AuthError::InvalidCredentials));
}

#[test]
fn login_publishes_loading_before_result() {
    let h = harness();
    h.store.restore();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    h.store.subscribe(move |s| sink.borrow_mut().push((s.is_loading(), s.is_authenticated())));
    block_on(h.store.login("admin@example.com", DEMO_PASSWORD));
    assert_eq!(*seen.borrow(), vec![(true, false), (false, true)]);
}

#[test]
fn login_clears_prior_error_while_pending() {
    let backend = Rc::new(GatedBackend::default());
    let h = harness_with(backend.clone());
    h.store.restore();
    block_on(async {
        let tx = backend.gate();
        tx.send(Err(AuthError::InvalidCredentials)).unwrap();
        h.store.login("x@example.com", "x").await;
    });
    assert_eq!(h.store.error(), Some(AuthError::InvalidCredentials));

    let mut pool = LocalPool::new();
    let _gate = backend.gate();
    let store = h.store.clone();
    pool.spawner().spawn_local(async move { store.login("y@example.com", "y").await }).unwrap();
    pool.run_until_stalled();
    assert!(h.store.is_loading());
    assert!(h.store.error().is_none());
}

#[test]
fn superseded_login_completion_is_dropped() {
    let backend = Rc::new(GatedBackend::default());
    let h = harness_with(backend.clone());
    h.store.restore();
    let first = backend.gate();
    let second = backend.gate();

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let store = h.store.clone();
    spawner.spawn_local(async move { store.login("police@example.com", DEMO_PASSWORD).await }).unwrap();
    pool.run_until_stalled();
    let store = h.store.clone();
    spawner.spawn_local(async move { store.login("admin@example.com", DEMO_PASSWORD).await }).unwrap();
    pool.run_until_stalled();

    second.send(Ok(seeded(Role::Admin))).unwrap();
    pool.run_until_stalled();
    assert_eq!(h.store.identity(), Some(seeded(Role::Admin)));

    first.send(Ok(seeded(Role::Police))).unwrap();
    pool.run_until_stalled();
    assert_eq!(h.store.identity(), Some(seeded(Role::Admin)));
    assert_eq!(storage::read_record(h.storage.as_ref(), KEY), Ok(StoredRecord::Valid(seeded(Role::Admin))));
    assert_eq!(h.timers.pending(), 1);
}

#[test]
fn logout_during_pending_login_wins() {
    let backend = Rc::new(GatedBackend::default());
    let h = harness_with(backend.clone());
    h.store.restore();
    let gate = backend.gate();

    let mut pool = LocalPool::new();
    let store = h.store.clone();
    pool.spawner().spawn_local(async move { store.login("police@example.com", DEMO_PASSWORD).await }).unwrap();
    pool.run_until_stalled();
    h.store.logout();

    gate.send(Ok(seeded(Role::Police))).unwrap();
    pool.run_until_stalled();
    assert_eq!(h.store.session(), Session::signed_out());
    assert!(!h.storage.contains(KEY));
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_always_signs_out_and_erases_record() {
    let h = harness();
    block_on(h.store.login("hospital@example.com", DEMO_PASSWORD));
    assert!(h.storage.contains(KEY));
    h.store.logout();
    assert_eq!(h.store.session(), Session::signed_out());
    assert!(!h.storage.contains(KEY));
}

#[test]
fn logout_from_fresh_store_settles_signed_out() {
    let h = harness();
    h.store.logout();
    assert_eq!(h.store.session(), Session::signed_out());
}

#[test]
fn logout_clears_error() {
    let h = harness();
    block_on(h.store.login("nobody@example.com", DEMO_PASSWORD));
    h.store.logout();
    assert!(h.store.error().is_none());
}

// =============================================================
// register
// =============================================================

#[test]
fn register_with_directory_email_is_in_use() {
    for identity in seed_identities() {
        let h = harness();
        h.store.restore();
        block_on(h.store.register("Dup", &identity.email, "pw", Role::Public));
        assert!(!h.store.is_authenticated());
        assert!(!h.store.is_loading());
        assert_eq!(h.store.error(), Some(AuthError::EmailInUse));
        assert!(!h.storage.contains(KEY));
    }
}

#[test]
fn register_with_fresh_email_signs_in_with_new_id() {
    let h = harness();
    h.store.restore();
    block_on(h.store.register("Ward Nurse", "nurse@example.com", "pw", Role::Hospital));
    let identity = h.store.identity().unwrap();
    assert_eq!(identity.name, "Ward Nurse");
    assert_eq!(identity.email, "nurse@example.com");
    assert_eq!(identity.role, Role::Hospital);
    assert!(seed_identities().iter().all(|seeded| seeded.id != identity.id));
    assert_eq!(storage::read_record(h.storage.as_ref(), KEY), Ok(StoredRecord::Valid(identity)));
    assert_eq!(h.timers.pending(), 1);
}

#[test]
fn failed_register_keeps_existing_identity() {
    let h = harness();
    block_on(h.store.login("public@example.com", DEMO_PASSWORD));
    block_on(h.store.register("Dup", "police@example.com", "pw", Role::Police));
    assert_eq!(h.store.identity(), Some(seeded(Role::Public)));
    assert_eq!(h.store.error(), Some(AuthError::EmailInUse));
}

// =============================================================
// idle timeout
// =============================================================

#[test]
fn idle_timer_logs_out_when_nothing_happened() {
    let h = harness();
    block_on(h.store.login("admin@example.com", DEMO_PASSWORD));
    assert_eq!(h.timers.fire_all(), 1);
    assert_eq!(h.store.session(), Session::signed_out());
    assert!(!h.storage.contains(KEY));
}

#[test]
fn idle_timer_after_logout_writes_nothing() {
    let h = harness();
    block_on(h.store.login("admin@example.com", DEMO_PASSWORD));
    h.store.logout();
    let writes = Rc::new(Cell::new(0));
    let counter = writes.clone();
    h.store.subscribe(move |_| counter.set(counter.get() + 1));
    assert_eq!(h.timers.fire_all(), 1);
    assert_eq!(writes.get(), 0);
}

#[test]
fn only_latest_idle_timer_logs_out() {
    let h = harness();
    block_on(h.store.login("admin@example.com", DEMO_PASSWORD));
    block_on(h.store.register("Fresh", "fresh@example.com", "pw", Role::Police));
    assert_eq!(h.timers.pending(), 2);
    let writes = Rc::new(Cell::new(0));
    let counter = writes.clone();
    h.store.subscribe(move |_| counter.set(counter.get() + 1));
    h.timers.fire_all();
    assert_eq!(writes.get(), 1);
    assert_eq!(h.store.session(), Session::signed_out());
}

#[test]
fn failed_register_keeps_idle_timeout_for_signed_in_identity() {
    let h = harness();
    block_on(h.store.login("public@example.com", DEMO_PASSWORD));
    block_on(h.store.register("Dup", "police@example.com", "pw", Role::Police));
    assert_eq!(h.store.identity(), Some(seeded(Role::Public)));
    assert_eq!(h.store.error(), Some(AuthError::EmailInUse));

    h.timers.fire_all();
    assert_eq!(h.store.session(), Session::signed_out());
    assert!(!h.storage.contains(KEY));
}

#[test]
fn failed_register_while_signed_out_arms_nothing() {
    let h = harness();
    h.store.restore();
    block_on(h.store.register("Dup", "police@example.com", "pw", Role::Police));
    assert_eq!(h.timers.pending(), 0);
}

#[test]
fn idle_timer_from_before_pending_login_does_not_interrupt_it() {
    let backend = Rc::new(GatedBackend::default());
    let h = harness_with(backend.clone());
    let first = backend.gate();
    first.send(Ok(seeded(Role::Police))).unwrap();
    block_on(h.store.login("police@example.com", DEMO_PASSWORD));
    assert_eq!(h.timers.pending(), 1);

    let gate = backend.gate();
    let mut pool = LocalPool::new();
    let store = h.store.clone();
    pool.spawner().spawn_local(async move { store.login("admin@example.com", DEMO_PASSWORD).await }).unwrap();
    pool.run_until_stalled();

    h.timers.fire_all();
    assert!(h.store.is_loading());

    gate.send(Ok(seeded(Role::Admin))).unwrap();
    pool.run_until_stalled();
    assert_eq!(h.store.identity(), Some(seeded(Role::Admin)));
}

#[test]
fn idle_timer_after_store_dropped_is_noop() {
    let h = harness();
    block_on(h.store.login("admin@example.com", DEMO_PASSWORD));
    let timers = h.timers.clone();
    drop(h);
    assert_eq!(timers.fire_all(), 1);
}

// =============================================================
// subscriptions
// =============================================================

#[test]
fn unsubscribed_listener_is_not_called() {
    let h = harness();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let handle = h.store.subscribe(move |_| counter.set(counter.get() + 1));
    h.store.restore();
    assert!(h.store.unsubscribe(handle));
    assert!(!h.store.unsubscribe(handle));
    h.store.logout();
    assert_eq!(calls.get(), 1);
}

#[test]
fn listener_may_reenter_store() {
    let h = harness();
    let reader = h.store.clone();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    h.store.subscribe(move |s| {
        assert_eq!(&reader.session(), s);
        sink.borrow_mut().push(reader.is_authenticated());
    });
    block_on(h.store.login("public@example.com", DEMO_PASSWORD));
    assert_eq!(*seen.borrow(), vec![false, true]);
}
