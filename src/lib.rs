//! User account service
//!
//! Request admission pipeline (panic containment, rate limiting, bearer-token
//! verification, service-signature verification) plus the session-token
//! lifecycle for a user account HTTP API.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod repository;
pub mod response;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
