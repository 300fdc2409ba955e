//! JWT Token Handler
//! Mission: Issue and verify signed, time-limited bearer tokens

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

/// Token issuer/verifier. Holds the process-wide signing secret,
/// read-only after startup.
pub struct JwtHandler {
    secret: String,
    validity: Duration,
}

impl JwtHandler {
    /// Create a handler issuing tokens with the fixed 1-hour validity window.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            validity: Duration::hours(1),
        }
    }

    /// Create a handler with a custom validity window.
    pub fn with_validity(secret: String, validity: Duration) -> Self {
        Self { secret, validity }
    }

    /// Issue a token bound to an account id.
    pub fn generate_token(&self, account_id: &Uuid) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.validity)
            .context("Invalid timestamp")?;

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        debug!(
            "Issuing token for subject {}, expires at {}",
            account_id,
            expiration.to_rfc3339()
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate token")
    }

    /// Verify a token's signature and expiry and extract its claims.
    ///
    /// A token is valid iff the signature verifies against the configured
    /// secret and the current time is before the encoded expiry. No other
    /// condition is checked; in particular the subject is not re-looked-up.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        // No leeway: a token is rejected the moment its expiry passes.
        let mut validation = Validation::default();
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid or expired token")?;

        debug!("Validated token for subject {}", decoded.claims.sub);

        Ok(decoded.claims)
    }
}
