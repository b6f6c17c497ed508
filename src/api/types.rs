//! Shared types for the API layer.

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::questionnaire::QuestionnaireService;
use crate::token::Role;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<QuestionnaireService>,
}

impl ApiContext {
    pub fn new(service: Arc<QuestionnaireService>) -> Self {
        Self { service }
    }
}

/// Authenticated caller, injected into request extensions by the auth
/// middleware after token decoding.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: String,
    pub role: Role,
}

impl UserContext {
    /// The questionnaire endpoints are student-only; everyone else is
    /// turned away regardless of token validity.
    pub fn require_student(&self) -> Result<(), ApiError> {
        if self.role == Role::Student {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}
