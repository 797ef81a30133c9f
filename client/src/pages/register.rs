//! Registration page: creates an account in the mock directory and signs in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::Role;
use session::guard::LOGIN_PATH;

use crate::state::auth::{use_auth, validate_registration};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Public.as_str().to_owned());
    let info = RwSignal::new(None::<String>);

    Effect::new(move || {
        let session = auth.current();
        if let (false, Some(identity)) = (session.is_loading(), session.identity()) {
            navigate(identity.role.home_path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.current_untracked().is_loading() {
            return;
        }
        let checked = validate_registration(
            &name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
            &role.get_untracked(),
        );
        match checked {
            Ok(form) => {
                info.set(None);
                auth.register(form);
            }
            Err(message) => info.set(Some(message.to_owned())),
        }
    };

    let busy = move || auth.current().is_loading();
    let message = move || info.get().or_else(|| auth.current().error().map(|e| e.to_string()));

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
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
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <select class="login-input" on:change=move |ev| role.set(event_target_value(&ev))>
                        {Role::ALL
                            .into_iter()
                            .map(|option| {
                                view! {
                                    <option value=option.as_str() selected=move || role.get() == option.as_str()>
                                        {option.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="login-message">{move || message().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? "
                    <a href=LOGIN_PATH>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
