//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and the access gate while reading the shared
//! session from the auth context provider.

pub mod navbar;
pub mod protected_route;
