//! Backend-for-frontend for the UMMobile university app.
//!
//! Proxies and reshapes the legacy academic gateway into typed REST
//! endpoints for the mobile client. This crate covers the questionnaire
//! subsystem: COVID eligibility verdicts, daily questionnaire intake,
//! and the per-user answer store.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod questionnaire;
pub mod token;
pub mod upstream;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, falling back to the app default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
