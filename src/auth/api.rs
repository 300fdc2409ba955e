//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    user_store::UserStore,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Register endpoint - POST /api/auth/register
///
/// Hashes the password and inserts one account. No token is issued on
/// registration. Any storage failure, a taken username included, maps to
/// the same generic error so the caller learns nothing about the cause.
pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AuthApiError::ValidationError);
    }

    state
        .user_store
        .create_account(&payload.username, &payload.password)
        .map_err(|e| {
            warn!("Registration failed for {}: {}", payload.username, e);
            AuthApiError::RegistrationFailed
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully!".to_string(),
        }),
    ))
}

/// Login endpoint - POST /api/auth/login
///
/// Unknown username and wrong password produce identical responses to
/// resist username enumeration. On success returns a token valid for
/// one hour; no session state is kept server-side.
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let account = state
        .user_store
        .verify_password(&payload.username, &payload.password)
        .map_err(|_| AuthApiError::InternalError)?
        .ok_or_else(|| {
            warn!("Failed login attempt: {}", payload.username);
            AuthApiError::InvalidCredentials
        })?;

    let token = state
        .jwt_handler
        .generate_token(&account.id)
        .map_err(|_| AuthApiError::InternalError)?;

    info!("Login successful: {}", account.username);

    Ok(Json(LoginResponse { token }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    ValidationError,
    RegistrationFailed,
    InvalidCredentials,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        match self {
            AuthApiError::ValidationError => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Username and password are required" })),
            )
                .into_response(),
            AuthApiError::RegistrationFailed => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "User registration failed" })),
            )
                .into_response(),
            AuthApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid credentials" })),
            )
                .into_response(),
            AuthApiError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_api_error_responses() {
        let validation = AuthApiError::ValidationError.into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let registration = AuthApiError::RegistrationFailed.into_response();
        assert_eq!(registration.status(), StatusCode::BAD_REQUEST);

        let credentials = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(credentials.status(), StatusCode::UNAUTHORIZED);

        let internal = AuthApiError::InternalError.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
