//! Route guard: decides whether a protected view renders or redirects.
//!
//! DESIGN
//! ======
//! `evaluate` is a pure function of the session snapshot, the view's allowed
//! roles, and the requested path. It holds no state and is re-run on every
//! navigation and every session change; callers own the side effects
//! (navigation, audit logging).

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::identity::Role;
use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
/// Query parameter carrying the originally requested path to the login view.
pub const FROM_PARAM: &str = "from";

/// What a protected view should do for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore or sign-in is in flight; show a placeholder.
    Loading,
    /// Nobody is signed in. `from` is the path to return to after login.
    RedirectToLogin { from: String },
    /// Signed in with a role the view does not allow; go to that role's home.
    RedirectToHome { to: &'static str },
    /// Show the view.
    Render,
}

impl GuardDecision {
    /// Where to navigate, if this decision is a redirect.
    #[must_use]
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::RedirectToLogin { from } => Some(login_url(from)),
            Self::RedirectToHome { to } => Some((*to).to_owned()),
            Self::Loading | Self::Render => None,
        }
    }
}

/// Decide what to render for `requested` given the view's `allowed` roles.
///
/// An empty `allowed` set admits any authenticated role.
#[must_use]
pub fn evaluate(session: &Session, allowed: &[Role], requested: &str) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Loading;
    }
    let Some(identity) = session.identity() else {
        return GuardDecision::RedirectToLogin { from: requested.to_owned() };
    };
    if !allowed.is_empty() && !allowed.contains(&identity.role) {
        return GuardDecision::RedirectToHome { to: identity.role.home_path() };
    }
    GuardDecision::Render
}

/// Login URL that returns to `from` afterwards. `from` is percent-encoded.
#[must_use]
pub fn login_url(from: &str) -> String {
    match sanitize_return_path(from) {
        Some(path) if path != "/" => format!("{LOGIN_PATH}?{FROM_PARAM}={}", urlencoding::encode(path)),
        _ => LOGIN_PATH.to_owned(),
    }
}

/// Path plus query string of the current location, as recorded for the
/// return after login. `search` may carry its leading `?` or not.
#[must_use]
pub fn requested_path(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// Whether `path` (query and fragment ignored) is the sign-in or sign-up view.
#[must_use]
pub fn is_auth_path(path: &str) -> bool {
    let bare = path.trim().split(['?', '#']).next().unwrap_or(path);
    bare == LOGIN_PATH || bare == REGISTER_PATH
}

/// Where to go after a successful sign-in: the recorded path when it is a
/// usable in-app path, otherwise the role's home.
#[must_use]
pub fn post_login_destination(from: Option<&str>, role: Role) -> String {
    from.and_then(sanitize_return_path)
        .map_or_else(|| role.home_path().to_owned(), str::to_owned)
}

/// Accept only absolute in-app paths that are not the auth views themselves.
fn sanitize_return_path(path: &str) -> Option<&str> {
    let path = path.trim();
    // Browsers read `/\host` as `//host`, a protocol-relative URL.
    if !path.starts_with('/') || path.starts_with("//") || path.contains('\\') {
        return None;
    }
    if is_auth_path(path) {
        return None;
    }
    Some(path)
}
