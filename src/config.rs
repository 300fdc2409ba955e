//! Startup Configuration
//! Mission: Load all runtime settings once and inject them explicitly

use anyhow::{Context, Result};

/// Runtime configuration, loaded once at startup and passed by handle
/// to the stores and the token handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./caregate.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        // The signing secret has no sane default; refuse to start without it.
        let jwt_secret =
            std::env::var("JWT_SECRET").context("JWT_SECRET must be set in the environment")?;

        Ok(Self {
            database_path,
            port,
            jwt_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the process environment is shared, so the missing-secret
    // and happy-path cases must not run in parallel with each other.
    #[test]
    fn test_from_env() {
        std::env::remove_var("DATABASE_PATH");
        std::env::remove_var("PORT");
        std::env::remove_var("JWT_SECRET");

        // No signing secret: refuse to start
        assert!(Config::from_env().is_err());

        // With a secret, everything else falls back to defaults
        std::env::set_var("JWT_SECRET", "test-secret-key-12345");
        let config = Config::from_env().unwrap();
        assert_eq!(config.database_path, "./caregate.db");
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_secret, "test-secret-key-12345");

        std::env::remove_var("JWT_SECRET");
    }
}
