//! Per-service request signature validation
//!
//! Trusted callers prove possession of the shared signing secret by sending
//! `X-Api-Key: hex(sha256("{service}:{secret}:{timestamp}"))` alongside the
//! service name and timestamp headers. The supplied digest must match the
//! recomputed one byte-for-byte; there is no tolerance or normalization.
//!
//! The timestamp is bound into the digest but its freshness is not checked,
//! so a captured signature stays replayable until the secret rotates.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};

pub const X_API_KEY: &str = "x-api-key";
pub const X_REQUEST_AT: &str = "x-request-at";
pub const X_SERVICE_NAME: &str = "x-service-name";

/// Compute the expected signature for a caller identity and timestamp.
pub fn expected_signature(service_name: &str, secret: &str, timestamp: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}:{}", service_name, secret, timestamp));
    hex::encode(hasher.finalize())
}

/// Validate the signature headers of a request against the shared secret.
/// Any missing header or digest mismatch yields `Unauthorized`; malformed
/// but present headers simply fail the comparison.
pub fn validate(headers: &HeaderMap, secret: &str) -> Result<()> {
    let api_key = header_str(headers, X_API_KEY)?;
    let request_at = header_str(headers, X_REQUEST_AT)?;
    let service_name = header_str(headers, X_SERVICE_NAME)?;

    if api_key != expected_signature(service_name, secret, request_at) {
        tracing::debug!(service = service_name, "service signature mismatch");
        return Err(AppError::Unauthorized);
    }

    Ok(())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)
}
