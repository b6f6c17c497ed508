//! Questionnaire orchestration.
//!
//! Glues the academic gateway, the answer store and the evaluator
//! together. Every upstream read degrades to a documented default so the
//! user-facing verdict never fails on a flaky gateway; only answer-store
//! writes propagate errors.

use std::sync::Mutex;

use chrono::{Local, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::config;
use crate::db::{self, DatabaseError};
use crate::models::{
    CovidInformation, CovidQuestionnaireAnswer, CovidValidation, Residence, StoredAnswer,
    StoredAnswers,
};
use crate::questionnaire::{intake, Evaluator};
use crate::upstream::AcademicClient;

/// Result of a proxied suspect-flag update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub struct QuestionnaireService {
    academic: AcademicClient,
    evaluator: Evaluator,
    store: Mutex<Connection>,
}

impl QuestionnaireService {
    pub fn new(academic: AcademicClient, store: Connection) -> Self {
        Self {
            academic,
            evaluator: Evaluator::default(),
            store: Mutex::new(store),
        }
    }

    /// The user's declaration, or the zero value when the gateway is down.
    pub async fn covid_information(&self, user_id: &str) -> CovidInformation {
        match self
            .academic
            .covid_information(user_id, config::DEFAULT_PERIOD)
            .await
        {
            Ok(info) => info,
            Err(err) => {
                tracing::warn!(user = user_id, error = %err, "declaration fetch failed, using defaults");
                CovidInformation::default()
            }
        }
    }

    /// Responsive-letter status; a failed read counts as "no letter",
    /// the conservative outcome.
    pub async fn responsive_letter(&self, user_id: &str) -> bool {
        match self.academic.responsive_letter(user_id).await {
            Ok(have) => have,
            Err(err) => {
                tracing::warn!(user = user_id, error = %err, "responsive letter fetch failed, assuming none");
                false
            }
        }
    }

    /// Residence type; a failed read falls back to `Unknown`.
    pub async fn residence(&self, user_id: &str) -> Residence {
        match self.academic.residence(user_id).await {
            Ok(residence) => residence,
            Err(err) => {
                tracing::warn!(user = user_id, error = %err, "residence fetch failed, assuming unknown");
                Residence::Unknown
            }
        }
    }

    /// Full eligibility verdict from fresh upstream data. The three
    /// gateway reads fan out concurrently and join before evaluation.
    pub async fn validation(&self, user_id: &str) -> CovidValidation {
        let (info, letter, residence) = tokio::join!(
            self.covid_information(user_id),
            self.responsive_letter(user_id),
            self.residence(user_id),
        );

        self.evaluator
            .evaluate(&info, letter, residence, user_id, Local::now().date_naive())
    }

    /// Persist a submitted questionnaire and return the fresh verdict.
    ///
    /// A failing answer flags the user as suspect upstream, dispatched
    /// without awaiting so a slow gateway cannot hold up the response;
    /// the write's failure is logged and otherwise dropped.
    pub async fn submit_answer(
        &self,
        user_id: &str,
        answer: CovidQuestionnaireAnswer,
    ) -> Result<CovidValidation, DatabaseError> {
        let can_pass = intake::can_pass(&answer);
        let now = Utc::now();
        let stored = StoredAnswer {
            id: Uuid::new_v4(),
            can_pass,
            countries: answer.countries,
            recent_contact: answer.recent_contact,
            major_symptoms: answer.major_symptoms,
            minor_symptoms: answer.minor_symptoms,
            created_at: now,
            updated_at: now,
        };

        {
            let conn = self.store.lock().map_err(|_| DatabaseError::LockPoisoned)?;
            db::append_answer(&conn, user_id, &stored)?;
        }

        if !can_pass {
            let academic = self.academic.clone();
            let user = user_id.to_string();
            tokio::spawn(async move {
                if let Err(err) = academic.mark_suspect(&user, true).await {
                    tracing::warn!(user = %user, error = %err, "suspect flag write failed");
                }
            });
        }

        Ok(self.validation(user_id).await)
    }

    /// All stored answers for the user, oldest first.
    pub fn answers(&self, user_id: &str) -> Result<StoredAnswers, DatabaseError> {
        let conn = self.store.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        db::answers_for_user(&conn, user_id)
    }

    /// Stored answers created today (server-local date).
    pub fn today_answers(&self, user_id: &str) -> Result<Vec<StoredAnswer>, DatabaseError> {
        let conn = self.store.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        db::answers_created_on(&conn, user_id, Local::now().date_naive())
    }

    /// Proxy a suspect-flag update to the gateway, synchronously. Unlike
    /// the intake path this caller wants to know whether the write stuck.
    pub async fn update_suspect(&self, user_id: &str, is_suspect: Option<bool>) -> UpdateOutcome {
        let Some(flag) = is_suspect else {
            return UpdateOutcome {
                updated: false,
                message: Some("Nothing to update".to_string()),
            };
        };

        match self.academic.mark_suspect(user_id, flag).await {
            Ok(()) => UpdateOutcome {
                updated: true,
                message: None,
            },
            Err(err) => {
                tracing::warn!(user = user_id, error = %err, "suspect flag update failed");
                UpdateOutcome {
                    updated: false,
                    message: Some(err.to_string()),
                }
            }
        }
    }
}
