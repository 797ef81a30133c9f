use std::cell::RefCell;

use futures::executor::block_on;

use super::*;

fn sign_up(email: &str) -> Registration {
    Registration {
        name: "Night Shift".to_owned(),
        email: email.to_owned(),
        password: "hunter2".to_owned(),
        role: Role::Hospital,
    }
}

// =============================================================
// MockDirectory
// =============================================================

#[test]
fn seed_has_one_identity_per_role() {
    let seeded = seed_identities();
    assert_eq!(seeded.len(), 4);
    for role in Role::ALL {
        assert_eq!(seeded.iter().filter(|i| i.role == role).count(), 1);
    }
}

#[test]
fn authenticate_accepts_shared_password_for_every_identity() {
    let directory = MockDirectory::new("123456");
    for identity in seed_identities() {
        let found = block_on(directory.authenticate(&identity.email, "123456"));
        assert_eq!(found, Ok(identity));
    }
}

#[test]
fn authenticate_rejects_wrong_password() {
    let directory = MockDirectory::new("123456");
    let result = block_on(directory.authenticate("police@example.com", "654321"));
    assert_eq!(result, Err(AuthError::InvalidCredentials));
}

#[test]
fn authenticate_rejects_unknown_email() {
    let directory = MockDirectory::new("123456");
    let result = block_on(directory.authenticate("nobody@example.com", "123456"));
    assert_eq!(result, Err(AuthError::InvalidCredentials));
}

#[test]
fn register_existing_email_is_in_use() {
    let directory = MockDirectory::new("123456");
    let result = block_on(directory.register(sign_up("admin@example.com")));
    assert_eq!(result, Err(AuthError::EmailInUse));
    assert_eq!(directory.identities().len(), 4);
}

#[test]
fn register_issues_sequential_ids_after_seed() {
    let directory = MockDirectory::new("123456");
    let first = block_on(directory.register(sign_up("a@example.com"))).unwrap();
    let second = block_on(directory.register(sign_up("b@example.com"))).unwrap();
    assert_eq!(first.id, "5");
    assert_eq!(second.id, "6");
    assert_eq!(first.role, Role::Hospital);
    assert_eq!(first.name, "Night Shift");
}

#[test]
fn registered_identity_can_log_in_and_cannot_register_twice() {
    let directory = MockDirectory::new("123456");
    let created = block_on(directory.register(sign_up("new@example.com"))).unwrap();
    assert_eq!(block_on(directory.authenticate("new@example.com", "123456")), Ok(created));
    assert_eq!(block_on(directory.register(sign_up("new@example.com"))), Err(AuthError::EmailInUse));
}

#[test]
fn with_identities_continues_after_highest_numeric_id() {
    let mut identities = seed_identities();
    identities[0].id = "41".to_owned();
    identities[1].id = "legacy".to_owned();
    let directory = MockDirectory::with_identities(identities, "pw");
    let created = block_on(directory.register(sign_up("c@example.com"))).unwrap();
    assert_eq!(created.id, "42");
}

// =============================================================
// WithLatency
// =============================================================

fn recording_sleep(log: Rc<RefCell<Vec<Duration>>>) -> SleepFn {
    Rc::new(move |d: Duration| -> LocalBoxFuture<'static, ()> {
        log.borrow_mut().push(d);
        Box::pin(async {})
    })
}

#[test]
fn latency_sleeps_before_each_call() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let backend = WithLatency::new(
        MockDirectory::new("123456"),
        Duration::from_millis(250),
        recording_sleep(log.clone()),
    );
    let _ = block_on(backend.authenticate("public@example.com", "123456"));
    let _ = block_on(backend.register(sign_up("d@example.com")));
    assert_eq!(*log.borrow(), vec![Duration::from_millis(250); 2]);
}

#[test]
fn zero_latency_skips_sleep() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let backend = WithLatency::new(MockDirectory::new("123456"), Duration::ZERO, recording_sleep(log.clone()));
    let result = block_on(backend.authenticate("public@example.com", "123456"));
    assert!(result.is_ok());
    assert!(log.borrow().is_empty());
}
