//! # campus-client
//!
//! Client side of the Campus Portal backend contract. [`PortalApi`] is the
//! seam the dashboards and the access guard depend on; [`HttpPortalApi`]
//! implements it over `reqwest` with bearer-token authentication.

pub mod api;
pub mod dto;
pub mod error;
pub mod http;

pub use api::{ApiUserResolver, PortalApi};
pub use http::HttpPortalApi;
