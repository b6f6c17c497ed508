//! HTTP surface of the aggregator.
//!
//! Routes live under `/questionnaire/` and are protected by the bearer
//! auth middleware, which derives the caller's user id and role from the
//! token before any handler runs.
//!
//! The router is composable — `api_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer};
pub use types::ApiContext;
