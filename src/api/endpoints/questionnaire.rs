//! Questionnaire endpoints.
//!
//! The COVID-era campus access flow: eligibility verdicts, declaration
//! passthrough, daily questionnaire intake, and the stored answer
//! history. Student-only; the auth middleware supplies the caller and
//! each handler enforces the role.

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::models::{
    CovidInformation, CovidQuestionnaireAnswer, CovidValidation, StoredAnswer, StoredAnswers,
};
use crate::questionnaire::service::UpdateOutcome;

/// `GET /questionnaire/covid/validate` — full eligibility verdict.
pub async fn validate(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<CovidValidation>, ApiError> {
    user.require_student()?;
    Ok(Json(ctx.service.validation(&user.user_id).await))
}

/// `GET /questionnaire/covid/extras` — raw declaration snapshot.
pub async fn extras(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<CovidInformation>, ApiError> {
    user.require_student()?;
    Ok(Json(ctx.service.covid_information(&user.user_id).await))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExtrasBody {
    #[serde(default)]
    pub is_suspect: Option<bool>,
}

/// `PATCH /questionnaire/covid/extras` — proxied suspect-flag update.
pub async fn update_extras(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    Json(body): Json<UpdateExtrasBody>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    user.require_student()?;
    Ok(Json(
        ctx.service
            .update_suspect(&user.user_id, body.is_suspect)
            .await,
    ))
}

/// `POST /questionnaire/covid` — submit the daily questionnaire.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    Json(answer): Json<CovidQuestionnaireAnswer>,
) -> Result<Json<CovidValidation>, ApiError> {
    user.require_student()?;
    let verdict = ctx.service.submit_answer(&user.user_id, answer).await?;
    Ok(Json(verdict))
}

/// `GET /questionnaire/covid` — all stored answers for the caller.
pub async fn answers(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<StoredAnswers>, ApiError> {
    user.require_student()?;
    Ok(Json(ctx.service.answers(&user.user_id)?))
}

/// `GET /questionnaire/covid/today` — answers submitted today.
pub async fn today_answers(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<StoredAnswer>>, ApiError> {
    user.require_student()?;
    Ok(Json(ctx.service.today_answers(&user.user_id)?))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveLetterResponse {
    pub have_responsive_letter: bool,
}

/// `GET /questionnaire/covid/responsiveLetter` — letter-on-file check.
pub async fn responsive_letter(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<ResponsiveLetterResponse>, ApiError> {
    user.require_student()?;
    Ok(Json(ResponsiveLetterResponse {
        have_responsive_letter: ctx.service.responsive_letter(&user.user_id).await,
    }))
}
