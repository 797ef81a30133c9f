use super::*;
use crate::identity::Role;

fn officer() -> Identity {
    Identity {
        id: "2".to_owned(),
        name: "Police Officer".to_owned(),
        role: Role::Police,
        email: "police@example.com".to_owned(),
        avatar: None,
    }
}

#[test]
fn default_is_loading_and_empty() {
    let session = Session::default();
    assert!(session.is_loading());
    assert!(!session.is_authenticated());
    assert!(session.error().is_none());
}

#[test]
fn signed_in_is_authenticated_and_settled() {
    let session = Session::signed_in(officer());
    assert!(session.is_authenticated());
    assert!(!session.is_loading());
    assert_eq!(session.identity().map(|i| i.role), Some(Role::Police));
}

#[test]
fn failed_carries_error_without_identity() {
    let session = Session::failed(AuthError::InvalidSession);
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert_eq!(session.error(), Some(AuthError::InvalidSession));
}

#[test]
fn pending_keeps_identity_and_clears_error() {
    let session = Session::signed_in(officer()).settled_with(AuthError::EmailInUse).pending();
    assert!(session.is_loading());
    assert!(session.is_authenticated());
    assert!(session.error().is_none());
}
