//! # campus-entity
//!
//! Domain entity models for Campus Portal. Every struct in this crate
//! mirrors a payload of the backend REST API or a value the client
//! derives from one. All entities derive `Debug`, `Clone`, `Serialize`
//! and `Deserialize`.

pub mod class;
pub mod grade;
pub mod ids;
pub mod session;
pub mod user;

pub use ids::{ClassId, StudentId};
