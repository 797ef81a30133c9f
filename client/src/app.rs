//! Root application component with routing and the auth context provider.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use session::SessionConfig;

use crate::pages::dashboard::{NotFoundPage, RoutePage};
use crate::pages::{login::LoginPage, register::RegisterPage};
use crate::state::auth::{AuthContext, browser_store};

/// Root application component.
///
/// Builds the session store once, restores any persisted session, provides
/// the auth context, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::new(browser_store(SessionConfig::default()));
    provide_context(auth);
    auth.restore();

    view! {
        <Title text="SmartResponse SOS"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("") view=|| view! { <RoutePage pattern="/"/> }/>
                <Route path=StaticSegment("report") view=|| view! { <RoutePage pattern="/report"/> }/>
                <Route path=StaticSegment("live-alerts") view=|| view! { <RoutePage pattern="/live-alerts"/> }/>
                <Route path=StaticSegment("sos") view=|| view! { <RoutePage pattern="/sos"/> }/>
                <Route path=StaticSegment("dispatch") view=|| view! { <RoutePage pattern="/dispatch"/> }/>
                <Route path=StaticSegment("case-details") view=|| view! { <RoutePage pattern="/case-details"/> }/>
                <Route
                    path=(StaticSegment("case-details"), ParamSegment("id"))
                    view=|| view! { <RoutePage pattern="/case-details/:id"/> }
                />
                <Route
                    path=StaticSegment("ambulance-tracker")
                    view=|| view! { <RoutePage pattern="/ambulance-tracker"/> }
                />
                <Route path=StaticSegment("triage") view=|| view! { <RoutePage pattern="/triage"/> }/>
                <Route path=StaticSegment("analytics") view=|| view! { <RoutePage pattern="/analytics"/> }/>
                <Route path=StaticSegment("user-mgmt") view=|| view! { <RoutePage pattern="/user-mgmt"/> }/>
            </Routes>
        </Router>
    }
}
