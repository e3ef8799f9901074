//! Configuration management
//!
//! All secrets and policies are loaded once at startup and treated as
//! immutable for the process lifetime. Components receive the configuration
//! explicitly so tests can substitute policies.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Service signature configuration
    pub signature: SignatureConfig,
    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret for session tokens
    pub secret: String,
    /// Session token lifetime in minutes
    pub expiration_minutes: i64,
}

/// Shared secret used to verify the per-service request signature
/// (`X-Api-Key` computed over service name, secret and timestamp).
#[derive(Debug, Clone)]
pub struct SignatureConfig {
    pub secret: String,
}

/// Rate limiting policy: one fixed window shared by all callers.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests admitted per window
    pub max_requests: u64,
    /// Window size in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("Invalid DATABASE_MAX_CONNECTIONS")?,
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .context("Invalid DATABASE_MIN_CONNECTIONS")?,
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                expiration_minutes: env::var("JWT_EXPIRATION_MINUTES")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .context("Invalid JWT_EXPIRATION_MINUTES")?,
            },
            signature: SignatureConfig {
                secret: env::var("SIGNATURE_SECRET").context("SIGNATURE_SECRET is required")?,
            },
            rate_limit: RateLimitConfig {
                max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .context("Invalid RATE_LIMIT_MAX_REQUESTS")?,
                window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .context("Invalid RATE_LIMIT_WINDOW_SECS")?,
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
