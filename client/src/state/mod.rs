//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The only app-wide state is the session; dashboards are placeholders and
//! keep whatever local state they need in their own signals.

pub mod auth;
