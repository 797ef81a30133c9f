//! Placeholder dashboards for every routed view.
//!
//! SYSTEM CONTEXT
//! ==============
//! The role dashboards (dispatch board, ambulance tracker, analytics, ...)
//! are presentational and not built out here. Each route renders its title
//! and summary from `session::routes`, wrapped in the same access gate the
//! real views would use.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::routes::{self, RouteSpec};

use crate::components::navbar::Layout;
use crate::components::protected_route::ProtectedRoute;
use crate::state::auth::use_auth;

/// Route entry registered under `pattern`, compared verbatim.
pub(crate) fn route_for_pattern(pattern: &str) -> Option<RouteSpec> {
    routes::ROUTES.iter().find(|route| route.pattern == pattern).copied()
}

/// Routed view for the table entry registered under `pattern`.
#[component]
pub fn RoutePage(pattern: &'static str) -> impl IntoView {
    let Some(route) = route_for_pattern(pattern) else {
        log::warn!("no route registered for {pattern}");
        return view! { <NotFoundPage/> }.into_any();
    };
    if route.is_protected() {
        view! {
            <Layout>
                <ProtectedRoute allowed=route.access.allowed_roles()>
                    <Placeholder route=route/>
                </ProtectedRoute>
            </Layout>
        }
        .into_any()
    } else {
        view! {
            <Layout>
                <Placeholder route=route/>
            </Layout>
        }
        .into_any()
    }
}

/// Title card standing in for a dashboard.
#[component]
fn Placeholder(route: RouteSpec) -> impl IntoView {
    let auth = use_auth();
    let signed_in_as = move || {
        auth.current()
            .identity()
            .map(|identity| format!("Signed in as {} ({})", identity.name, identity.role.label()))
    };

    view! {
        <section class="dashboard">
            <h1 class="dashboard__title">{route.title}</h1>
            <p class="dashboard__summary">{route.summary}</p>
            <p class="dashboard__identity">{signed_in_as}</p>
        </section>
    }
}

/// Catch-all for unknown paths.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"Page not found."</p>
            <a href="/">"Return home"</a>
        </div>
    }
}
