//! Locally persisted session state.

pub mod model;

pub use model::SessionData;
