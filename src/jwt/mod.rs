//! Session token issuance and verification
//!
//! Tokens are compact JWTs signed with HS256. The algorithm is pinned
//! server-side: a token whose header declares anything else is rejected
//! before its signature is even considered, which closes the classic
//! algorithm-confusion forgery.

use crate::config::JwtConfig;
use crate::domain::UserResponse;
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in a session token. Created once at login, read-only
/// afterwards; reconstructed by `verify` for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The authenticated user summary
    pub user: UserResponse,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies session tokens with a fixed secret and algorithm.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_minutes: i64,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiration_minutes: config.expiration_minutes,
        }
    }

    /// Strict validation: HS256 only, 5 seconds of leeway for clock skew
    /// instead of the default 60.
    fn validation() -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.leeway = 5;
        v
    }

    /// Issue a signed token embedding `user`, expiring after the configured
    /// lifetime. Only fails on serialization errors, which should not occur
    /// for well-formed claims.
    pub fn issue(&self, user: &UserResponse) -> Result<String> {
        let exp = Utc::now() + Duration::minutes(self.expiration_minutes);
        let claims = SessionClaims {
            user: user.clone(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify a token and reconstruct its claims. Parse failures, algorithm
    /// mismatches, signature mismatches and past expiry all surface as
    /// `Unauthorized`; the reason is logged, never returned to the caller.
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("session token rejected: {}", e);
                AppError::Unauthorized
            })
    }
}
