//! Authentication Module
//! Mission: Credential storage, token issuance, and the auth gate

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, AuthContext};
pub use user_store::UserStore;
