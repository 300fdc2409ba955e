//! Caregate - Healthcare Administration API
//! Mission: Patient records and insurance authorization requests behind
//! a token-gated API

use anyhow::{Context, Result};
use caregate_backend::{
    api::create_app,
    auth::{JwtHandler, UserStore},
    config::Config,
    records::RecordStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let user_store = Arc::new(UserStore::new(&config.database_path)?);
    let records = Arc::new(RecordStore::new(&config.database_path)?);
    let jwt_handler = Arc::new(JwtHandler::new(config.jwt_secret.clone()));

    let app = create_app(user_store, jwt_handler, records);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Caregate API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
