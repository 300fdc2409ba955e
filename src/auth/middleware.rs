//! Authentication Middleware
//! Mission: Gate protected routes behind bearer token verification

use crate::auth::jwt::JwtHandler;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Request-scoped identity attached by the auth gate once a token
/// has been verified. Consumed only within a single request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject_id: String,
}

/// Auth gate applied to every protected route.
///
/// Extracts a bearer token from the Authorization header, verifies
/// signature and expiry, and either admits the request with an
/// [`AuthContext`] in its extensions or short-circuits with 401. The
/// downstream handler never runs on rejection. The gate checks token
/// validity only; it performs no role or permission checks.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    // Bad signature, expired, and malformed payload all collapse into
    // the same rejection; the cause is not surfaced to the caller.
    let claims = jwt_handler
        .validate_token(token)
        .map_err(|_| AuthError::InvalidToken)?;

    req.extensions_mut().insert(AuthContext {
        subject_id: claims.sub,
    });

    Ok(next.run(req).await)
}

/// Auth gate rejections
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
        };

        (status, axum::Json(serde_json::json!({ "message": message }))).into_response()
    }
}
