//! Top navigation bar and the page layout that hosts it.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::guard::LOGIN_PATH;
use session::routes;

use crate::state::auth::use_auth;

/// Navbar with role-specific links, the user's initials, and logout.
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();

    let links = move || {
        auth.current().identity().map(|identity| {
            routes::nav_links(identity.role)
                .iter()
                .map(|link| view! { <a class="navbar__link" href=link.path>{link.label}</a> })
                .collect_view()
        })
    };

    let account = move || match auth.current().identity().cloned() {
        Some(identity) => {
            let avatar = identity.avatar.clone();
            view! {
                <div class="navbar__account">
                    {match avatar {
                        Some(src) => view! { <img class="navbar__avatar" src=src alt=identity.name.clone()/> }.into_any(),
                        None => view! { <span class="navbar__avatar">{identity.initials()}</span> }.into_any(),
                    }}
                    <span class="navbar__name">{identity.name.clone()}</span>
                    <span class="navbar__role">{identity.role.label()}</span>
                    <LogoutButton/>
                </div>
            }
            .into_any()
        }
        None => view! { <a class="navbar__link" href=LOGIN_PATH>"Sign in"</a> }.into_any(),
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href=move || routes::brand_target(&auth.current())>
                <span class="navbar__brand-name">"SmartResponse"</span>
                <span class="navbar__brand-sos">"SOS"</span>
            </a>
            <div class="navbar__links">{links}</div>
            {account}
        </nav>
    }
}

/// Clears the session, then leaves for the sign-in view.
#[component]
fn LogoutButton() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let on_click = move |_: leptos::ev::MouseEvent| {
        auth.logout();
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <button class="navbar__logout" type="button" on:click=on_click>
            "Log out"
        </button>
    }
}

/// Page chrome shared by every routed view except the auth screens.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <Navbar/>
        <main class="layout__main">{children()}</main>
    }
}
