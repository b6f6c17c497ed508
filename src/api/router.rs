//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! All `/questionnaire/` routes require bearer token authentication; the
//! health probe stays open.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::questionnaire::QuestionnaireService;

/// Build the API router.
pub fn api_router(service: Arc<QuestionnaireService>) -> Router {
    build_router(ApiContext::new(service))
}

fn build_router(ctx: ApiContext) -> Router {
    // Protected routes — handlers use State<ApiContext>; the auth layer
    // only needs the request headers, so no Extension layer is required.
    let protected = Router::new()
        .route(
            "/questionnaire/covid/validate",
            get(endpoints::questionnaire::validate),
        )
        .route(
            "/questionnaire/covid/extras",
            get(endpoints::questionnaire::extras).patch(endpoints::questionnaire::update_extras),
        )
        .route(
            "/questionnaire/covid",
            get(endpoints::questionnaire::answers).post(endpoints::questionnaire::submit),
        )
        .route(
            "/questionnaire/covid/today",
            get(endpoints::questionnaire::today_answers),
        )
        .route(
            "/questionnaire/covid/responsiveLetter",
            get(endpoints::questionnaire::responsive_letter),
        )
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::auth::require_auth));

    // Unprotected routes
    let unprotected = Router::new().route("/health", get(endpoints::health::check));

    Router::new()
        .merge(protected)
        .merge(unprotected)
        .layer(CorsLayer::permissive())
}
