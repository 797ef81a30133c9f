//! # client
//!
//! Leptos + WASM single-page client for SmartResponse SOS.
//!
//! This crate wires the `session` core into the browser: it provides the
//! session store through context, gates role-specific dashboards behind
//! `ProtectedRoute`, and renders the sign-in and registration screens. The
//! dashboards themselves are placeholders.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
