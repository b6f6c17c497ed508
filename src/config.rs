use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "UMMobile API";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// School period the academic gateway is queried for when none is given.
pub const DEFAULT_PERIOD: &str = "2122A";

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    "info,ummobile_api=debug".to_string()
}

/// Errors raised while reading settings from the environment.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the academic gateway (legacy SOAP/REST bridge).
    pub academic_url: String,
    /// Credentials for the gateway's `/login` token endpoint.
    pub academic_user: String,
    pub academic_password: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Path of the SQLite answer store.
    pub database_path: PathBuf,
}

impl Settings {
    /// Read settings from the environment.
    ///
    /// `ACADEMIC_URL`, `ACADEMIC_USER` and `ACADEMIC_PASSWORD` are required;
    /// `BIND_ADDR` and `DATABASE_PATH` have local defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        let academic_url = require("ACADEMIC_URL")?;
        let academic_user = require("ACADEMIC_USER")?;
        let academic_password = require("ACADEMIC_PASSWORD")?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| SettingsError::InvalidVar {
            var: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let database_path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("ummobile.db"));

        Ok(Self {
            academic_url: academic_url.trim_end_matches('/').to_string(),
            academic_user,
            academic_password,
            bind_addr,
            database_path,
        })
    }
}

fn require(var: &'static str) -> Result<String, SettingsError> {
    env::var(var).map_err(|_| SettingsError::MissingVar(var))
}
