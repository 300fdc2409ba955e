//! Router Assembly
//! Mission: Compose public and protected routes into one application

use crate::api::{authorizations, patients};
use crate::auth::{api as auth_api, auth_middleware, AuthState, JwtHandler, UserStore};
use crate::middleware::request_logging;
use crate::records::RecordStore;
use axum::{
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Shared application state for resource handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordStore>,
}

/// Build the application router.
///
/// Protected routes sit behind the auth gate; the gate runs before any
/// resource handler and rejected requests never reach them. Auth routes
/// and the health check are public.
pub fn create_app(
    user_store: Arc<UserStore>,
    jwt_handler: Arc<JwtHandler>,
    records: Arc<RecordStore>,
) -> Router {
    let auth_state = AuthState::new(user_store, jwt_handler.clone());
    let app_state = AppState { records };

    let auth_routes = Router::new()
        .route("/api/auth/register", post(auth_api::register))
        .route("/api/auth/login", post(auth_api::login))
        .with_state(auth_state);

    let protected_routes = Router::new()
        .route(
            "/api/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route("/api/patients/:id", get(patients::get_patient))
        .route(
            "/api/authorization",
            get(authorizations::list_authorizations).post(authorizations::create_authorization),
        )
        .route(
            "/api/authorization/:id",
            patch(authorizations::update_authorization),
        )
        .route_layer(middleware::from_fn_with_state(jwt_handler, auth_middleware))
        .with_state(app_state);

    let public_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(tower_http::cors::CorsLayer::permissive())
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
