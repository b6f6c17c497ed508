//! Academic gateway client.
//!
//! The gateway is a legacy SOAP/REST bridge: every data call is a GET
//! with query parameters, authenticated by a short-lived token from
//! `/login` passed back verbatim in the `Authorization` header. Fields
//! come back with Spanish names, `"S"/"N"` booleans and `dd/mm/yyyy`
//! dates; this module owns the reshaping into typed models.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Settings;
use crate::models::{CovidInformation, Residence};
use crate::upstream::dates::parse_legacy_date;

/// Errors from gateway calls. Read paths degrade these to defaults at
/// the service layer; only the suspect-flag write surfaces them.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gateway returned status {0}")]
    Status(StatusCode),
}

/// HTTP client for the academic gateway.
#[derive(Clone)]
pub struct AcademicClient {
    client: reqwest::Client,
    base_url: String,
    user: String,
    password: String,
}

impl AcademicClient {
    pub fn new(base_url: &str, user: &str, password: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.academic_url,
            &settings.academic_user,
            &settings.academic_password,
        )
    }

    /// Fetch a fresh gateway token. The gateway has no refresh semantics;
    /// every operation logs in again.
    async fn token(&self) -> Result<String, UpstreamError> {
        let response = self
            .client
            .get(format!("{}/login", self.base_url))
            .query(&[("password", &self.password), ("user", &self.user)])
            .send()
            .await?;
        let body = check_status(response)?.text().await?;
        Ok(body.trim().trim_matches('"').to_string())
    }

    /// The user's COVID declaration for the given school period.
    pub async fn covid_information(
        &self,
        user_id: &str,
        period_id: &str,
    ) -> Result<CovidInformation, UpstreamError> {
        let token = self.token().await?;
        let response = self
            .client
            .get(format!("{}/datosDeRetorno", self.base_url))
            .query(&[("CodigoAlumno", user_id), ("PeriodoId", period_id)])
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        let data: Value = check_status(response)?.json().await?;
        Ok(reshape_covid_information(&data))
    }

    /// Whether the user has a signed responsive letter on file.
    pub async fn responsive_letter(&self, user_id: &str) -> Result<bool, UpstreamError> {
        let token = self.token().await?;
        let response = self
            .client
            .get(format!("{}/tieneCartaResponsiva", self.base_url))
            .query(&[("CodigoAlumno", user_id)])
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        let body = check_status(response)?.text().await?;
        Ok(is_si(body.trim().trim_matches('"')))
    }

    /// The student's residence type, from the academic record.
    pub async fn residence(&self, user_id: &str) -> Result<Residence, UpstreamError> {
        let token = self.token().await?;
        let response = self
            .client
            .get(format!("{}/academico", self.base_url))
            .query(&[("CodigoAlumno", user_id)])
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        let data: Value = check_status(response)?.json().await?;
        Ok(data["residencia"]
            .as_str()
            .map(Residence::from_upstream)
            .unwrap_or(Residence::Unknown))
    }

    /// Write the suspect flag back to the gateway.
    pub async fn mark_suspect(
        &self,
        user_id: &str,
        is_suspect: bool,
    ) -> Result<(), UpstreamError> {
        let token = self.token().await?;
        let flag = if is_suspect { "S" } else { "N" };
        let response = self
            .client
            .get(format!("{}/actualizaSospechoso", self.base_url))
            .query(&[("CodigoAlumno", user_id), ("Sospechoso", flag)])
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status(status));
    }
    Ok(response)
}

/// Reshape the raw `datosDeRetorno` payload into a typed declaration.
/// Unknown or malformed fields degrade to the zero value per field.
fn reshape_covid_information(data: &Value) -> CovidInformation {
    CovidInformation {
        arrival_date: date_field(data, "fechaLlegada"),
        is_vaccinated: flag_field(data, "vacuna"),
        have_covid: flag_field(data, "positivoCovid"),
        start_covid_date: date_field(data, "fechaPositivo"),
        is_suspect: flag_field(data, "sospechoso"),
        start_suspicion_date: date_field(data, "fechaSospechoso"),
        is_in_quarantine: flag_field(data, "aislamiento"),
        quarantine_end_date: date_field(data, "finAislamiento"),
    }
}

/// `"S"/"N"` with the occasional real boolean from newer gateway builds.
fn flag_field(data: &Value, key: &str) -> bool {
    match &data[key] {
        Value::Bool(b) => *b,
        Value::String(s) => is_si(s),
        _ => false,
    }
}

fn date_field(data: &Value, key: &str) -> Option<chrono::NaiveDate> {
    data[key].as_str().and_then(parse_legacy_date)
}

fn is_si(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_uppercase().as_str(), "S" | "SI")
}
