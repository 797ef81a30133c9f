//! The product's route table and per-role navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client builds its router from these entries and the CLI uses them to
//! answer "what would happen if I opened this path". Each entry declares the
//! roles allowed through the guard; the dashboards behind them are
//! placeholders.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::guard::{self, GuardDecision};
use crate::identity::Role;
use crate::session::Session;

const POLICE: &[Role] = &[Role::Police, Role::Admin];
const HOSPITAL: &[Role] = &[Role::Hospital, Role::Admin];
const ADMIN: &[Role] = &[Role::Admin];

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No guard.
    Open,
    /// Any signed-in role.
    Authenticated,
    /// Signed in with one of these roles.
    Roles(&'static [Role]),
}

impl Access {
    /// Allowed-role set handed to the guard (empty = any authenticated role).
    #[must_use]
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Roles(roles) => roles,
            Self::Open | Self::Authenticated => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    /// Path pattern; segments starting with `:` match any single segment.
    pub pattern: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub access: Access,
}

impl RouteSpec {
    #[must_use]
    pub fn is_protected(&self) -> bool {
        !matches!(self.access, Access::Open)
    }

    /// Whether `path` (query and fragment ignored) matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut wanted = segments(self.pattern);
        let mut given = segments(strip_suffixes(path));
        loop {
            match (wanted.next(), given.next()) {
                (None, None) => return true,
                (Some(w), Some(g)) if w.starts_with(':') || w == g => {}
                _ => return false,
            }
        }
    }
}

fn strip_suffixes(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

pub const ROUTES: &[RouteSpec] = &[
    RouteSpec { pattern: "/", title: "Home", summary: "Emergency overview and quick actions.", access: Access::Open },
    RouteSpec { pattern: "/login", title: "Sign in", summary: "Sign in to SmartResponse SOS.", access: Access::Open },
    RouteSpec { pattern: "/register", title: "Register", summary: "Create an account.", access: Access::Open },
    RouteSpec {
        pattern: "/report",
        title: "Report Accident",
        summary: "Report an incident with location and photos.",
        access: Access::Authenticated,
    },
    RouteSpec {
        pattern: "/live-alerts",
        title: "Live Alerts",
        summary: "Active incidents near you.",
        access: Access::Authenticated,
    },
    RouteSpec {
        pattern: "/sos",
        title: "Emergency SOS",
        summary: "One-tap distress call with your location.",
        access: Access::Authenticated,
    },
    RouteSpec {
        pattern: "/dispatch",
        title: "Dispatch",
        summary: "Incoming incidents and unit assignment.",
        access: Access::Roles(POLICE),
    },
    RouteSpec {
        pattern: "/case-details",
        title: "Case Details",
        summary: "Case file for an incident.",
        access: Access::Roles(POLICE),
    },
    RouteSpec {
        pattern: "/case-details/:id",
        title: "Case Details",
        summary: "Case file for an incident.",
        access: Access::Roles(POLICE),
    },
    RouteSpec {
        pattern: "/ambulance-tracker",
        title: "Ambulance Tracker",
        summary: "Ambulance positions and ETAs.",
        access: Access::Roles(HOSPITAL),
    },
    RouteSpec {
        pattern: "/triage",
        title: "Triage",
        summary: "Incoming patients by priority.",
        access: Access::Roles(HOSPITAL),
    },
    RouteSpec {
        pattern: "/analytics",
        title: "Analytics",
        summary: "Response times and incident trends.",
        access: Access::Roles(ADMIN),
    },
    RouteSpec {
        pattern: "/user-mgmt",
        title: "User Management",
        summary: "Accounts and role assignments.",
        access: Access::Roles(ADMIN),
    },
];

/// First route whose pattern matches `path`.
#[must_use]
pub fn find(path: &str) -> Option<&'static RouteSpec> {
    ROUTES.iter().find(|route| route.matches(path))
}

/// Guard decision for opening `path`. Unguarded and unknown paths render
/// (unknown ones as the not-found view).
#[must_use]
pub fn decide(session: &Session, path: &str) -> GuardDecision {
    match find(path) {
        Some(route) if route.is_protected() => guard::evaluate(session, route.access.allowed_roles(), path),
        _ => GuardDecision::Render,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
}

macro_rules! links {
    ($($path:literal => $label:literal),* $(,)?) => {
        &[$(NavLink { path: $path, label: $label }),*]
    };
}

const PUBLIC_LINKS: &[NavLink] = links![
    "/" => "Home",
    "/report" => "Report Accident",
    "/live-alerts" => "Live Alerts",
    "/sos" => "Emergency SOS",
];
const POLICE_LINKS: &[NavLink] = links!["/dispatch" => "Dispatch", "/case-details" => "Case Details"];
const HOSPITAL_LINKS: &[NavLink] = links!["/ambulance-tracker" => "Ambulance Tracker", "/triage" => "Triage"];
const ADMIN_LINKS: &[NavLink] = links!["/analytics" => "Analytics", "/user-mgmt" => "User Management"];

/// Navigation entries shown to a signed-in `role`.
#[must_use]
pub fn nav_links(role: Role) -> &'static [NavLink] {
    match role {
        Role::Public => PUBLIC_LINKS,
        Role::Police => POLICE_LINKS,
        Role::Hospital => HOSPITAL_LINKS,
        Role::Admin => ADMIN_LINKS,
    }
}

/// Target of the brand link: the role's home, or `/` when signed out.
#[must_use]
pub fn brand_target(session: &Session) -> &'static str {
    session.identity().map_or("/", |identity| identity.role.home_path())
}
