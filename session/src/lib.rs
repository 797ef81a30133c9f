//! Session and route-authorization core for the SmartResponse SOS client.
//!
//! This crate owns the authentication model shared by the `client` UI and the
//! `cli` driver: identities and roles, the process-wide [`SessionStore`], the
//! ports it talks to (identity backend, durable storage, idle timers), and the
//! pure route guard consulted before rendering any protected view.
//!
//! Nothing here touches the browser or a runtime directly. Environment glue
//! is injected through the traits in [`backend`], [`storage`], and [`timer`].

pub mod backend;
pub mod config;
pub mod error;
pub mod guard;
pub mod identity;
pub mod routes;
pub mod session;
pub mod storage;
pub mod store;
pub mod timer;

pub use backend::{IdentityBackend, MockDirectory, Registration, WithLatency};
pub use config::SessionConfig;
pub use error::{AuthError, StorageError};
pub use guard::{GuardDecision, evaluate};
pub use identity::{Identity, Role};
pub use session::Session;
pub use storage::{MemoryStorage, SessionStorage};
pub use store::{SessionStore, Subscription};
pub use timer::{IdleScheduler, ManualTimers};
