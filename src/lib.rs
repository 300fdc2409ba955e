//! Caregate Backend Library
//!
//! Healthcare-administration backend: patient records and insurance
//! authorization requests behind username/password authentication with
//! bearer tokens. Exposes all modules so integration tests can assemble
//! the router in-process.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;
pub mod models;
pub mod records;
