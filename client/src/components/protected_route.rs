//! Role-gated wrapper for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page renders through this component so unauthenticated and
//! wrong-role redirects behave identically. The decision itself lives in
//! `session::guard`; this component only turns it into a render or a
//! navigation and writes the audit line.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{GuardDecision, Role, guard};

use crate::state::auth::use_auth;

/// Render `children` only when the current session may see them.
///
/// `allowed` empty means any signed-in role.
#[component]
pub fn ProtectedRoute(#[prop(optional)] allowed: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        let requested = guard::requested_path(&location.pathname.get(), &location.search.get());
        guard::evaluate(&auth.current(), allowed, &requested)
    });

    Effect::new(move || {
        let decision = decision.get();
        if let GuardDecision::RedirectToLogin { from } = &decision {
            // Already leaving for the sign-in view (logout); nothing was denied.
            if guard::is_auth_path(from) {
                return;
            }
            log::info!("Unauthorized access attempt to {from}");
        }
        if let Some(target) = decision.redirect_target() {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match decision.get() {
        GuardDecision::Loading => view! {
            <div class="guard-loading">
                <span class="guard-loading__spinner"></span>
                <span class="guard-loading__label">"Loading..."</span>
            </div>
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::RedirectToLogin { .. } | GuardDecision::RedirectToHome { .. } => ().into_any(),
    }
}
