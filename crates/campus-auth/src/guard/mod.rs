//! Per-navigation access enforcement.

pub mod access;
pub mod navigator;
pub mod resolver;

pub use access::{AccessGuard, AccessOutcome, RedirectReason};
pub use navigator::{Navigator, RecordingNavigator};
pub use resolver::UserResolver;
