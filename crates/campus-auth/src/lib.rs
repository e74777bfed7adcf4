//! # campus-auth
//!
//! Client-side authentication and authorization for Campus Portal.
//!
//! ## Modules
//!
//! - `rbac`: fixed role → page table and the pure path check
//! - `session`: bearer token persistence (memory and file backends)
//! - `guard`: per-navigation access enforcement with redirects

pub mod guard;
pub mod rbac;
pub mod session;

pub use guard::{AccessGuard, AccessOutcome, Navigator, RedirectReason, UserResolver};
pub use rbac::{RouteEnforcer, RoutePolicies};
pub use session::{FileSessionStore, MemorySessionStore, SessionManager, SessionStore};
