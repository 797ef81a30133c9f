//! Plain-text rendering of sessions, guard decisions, and the route table.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use session::routes::{Access, RouteSpec};
use session::{GuardDecision, Session};

pub fn describe_session(session: &Session) -> String {
    if let Some(identity) = session.identity() {
        let mut line = format!("{} <{}> as {} (id {})", identity.name, identity.email, identity.role, identity.id);
        if let Some(err) = session.error() {
            line.push_str(&format!(" [last error: {err}]"));
        }
        return line;
    }
    match session.error() {
        Some(err) => format!("signed out ({err})"),
        None if session.is_loading() => "restoring".to_owned(),
        None => "signed out".to_owned(),
    }
}

pub fn describe_decision(path: &str, decision: &GuardDecision) -> String {
    match decision {
        GuardDecision::Render => format!("{path}: render"),
        GuardDecision::Loading => format!("{path}: loading"),
        GuardDecision::RedirectToLogin { .. } | GuardDecision::RedirectToHome { .. } => {
            let target = decision.redirect_target().unwrap_or_default();
            format!("{path}: redirect to {target}")
        }
    }
}

pub fn describe_access(access: Access) -> String {
    match access {
        Access::Open => "open".to_owned(),
        Access::Authenticated => "any role".to_owned(),
        Access::Roles(roles) => roles.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
    }
}

pub fn route_line(route: &RouteSpec) -> String {
    format!("{:<22} {:<20} {}", route.pattern, route.title, describe_access(route.access))
}
