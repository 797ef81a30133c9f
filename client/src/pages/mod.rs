//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates chrome and access
//! control to `components`.

pub mod dashboard;
pub mod login;
pub mod register;
