//! API middleware stack.
//!
//! A single layer: bearer token authentication, which injects the
//! caller's identity for handlers to authorize against.

pub mod auth;
