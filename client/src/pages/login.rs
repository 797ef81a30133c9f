//! Login page: email + password against the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly or through a guard redirect carrying `?from=<path>`.
//! Once the session is authenticated the page forwards to that path, or to
//! the role's home when none was recorded.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use session::backend::seed_identities;
use session::guard::{FROM_PARAM, REGISTER_PATH, post_login_destination};

use crate::state::auth::{use_auth, validate_login_input};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(None::<String>);

    Effect::new(move || {
        let session = auth.current();
        if session.is_loading() {
            return;
        }
        if let Some(identity) = session.identity() {
            let from = query.with(|q| q.get(FROM_PARAM));
            let target = post_login_destination(from.as_deref(), identity.role);
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.current_untracked().is_loading() {
            return;
        }
        match validate_login_input(&email.get_untracked(), &password.get_untracked()) {
            Ok((email_value, password_value)) => {
                info.set(None);
                auth.login(email_value, password_value);
            }
            Err(message) => info.set(Some(message.to_owned())),
        }
    };

    let busy = move || auth.current().is_loading();
    let message = move || info.get().or_else(|| auth.current().error().map(|e| e.to_string()));
    let demo_password = auth.store().config().demo_password.clone();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"SmartResponse SOS"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="login-message">{move || message().unwrap_or_default()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">"Demo accounts (password " {demo_password} ")"</p>
                <ul class="login-demo">
                    {seed_identities()
                        .into_iter()
                        .map(|identity| {
                            let fill = identity.email.clone();
                            view! {
                                <li>
                                    <button
                                        class="login-demo__account"
                                        type="button"
                                        on:click=move |_| email.set(fill.clone())
                                    >
                                        {identity.role.label()}
                                        ": "
                                        {identity.email}
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <p class="login-card__footer">
                    "No account? "
                    <a href=REGISTER_PATH>"Register"</a>
                </p>
            </div>
        </div>
    }
}
