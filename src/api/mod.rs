//! Resource API
//! Mission: HTTP handlers for patient and authorization-request records

pub mod authorizations;
pub mod error;
pub mod patients;
pub mod routes;

pub use routes::{create_app, AppState};
