//! Clients for the upstream systems this service aggregates.

pub mod academic;
pub mod dates;

pub use academic::{AcademicClient, UpstreamError};
