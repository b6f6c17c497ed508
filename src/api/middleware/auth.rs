//! Bearer token authentication middleware.
//!
//! Extracts `Authorization: Bearer <token>`, decodes the JWT subject
//! (signature verification belongs to the identity server upstream of
//! this BFF), derives the numeric user id and role, and injects
//! `UserContext` into request extensions for downstream handlers.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::UserContext;
use crate::token;

/// Require a decodable bearer token on the request.
///
/// On success: injects `UserContext`. Role enforcement happens in the
/// handlers, since each endpoint decides which roles it admits.
pub async fn require_auth(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_auth_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = header.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)?;

    let user_id = token::user_id_from_token(token).ok_or(ApiError::Unauthorized)?;
    let role = token::role_for_id(&user_id);

    req.extensions_mut().insert(UserContext { user_id, role });

    Ok(next.run(req).await)
}
