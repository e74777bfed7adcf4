//! Class-level derived values.

pub mod progress;

pub use progress::class_progress;
