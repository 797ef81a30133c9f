//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, timers) from page and
//! component logic so the session core stays testable off-browser.

pub mod local_storage;
pub mod timers;
