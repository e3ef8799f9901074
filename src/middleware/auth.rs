//! Request authentication middleware
//!
//! Protected routes pass through `authenticate`, which enforces the
//! two-factor trust model: a valid session token in the `Authorization`
//! header and a valid per-service signature over the `X-Api-Key`,
//! `X-Request-At` and `X-Service-Name` headers. On success the claims' user
//! is attached to the request extensions for the handler; on any failure the
//! pipeline answers 401 immediately.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::jwt::TokenCodec;
use crate::middleware::signature;

use crate::domain::UserResponse;

/// Shared state for the authentication middleware
#[derive(Clone)]
pub struct AuthState {
    codec: Arc<TokenCodec>,
    signature_secret: Arc<str>,
}

impl AuthState {
    pub fn new(codec: Arc<TokenCodec>, signature_secret: &str) -> Self {
        Self {
            codec,
            signature_secret: signature_secret.into(),
        }
    }
}

/// The authenticated identity attached to a request's extensions. Owned by
/// that single request's processing lifetime, never shared across requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserResponse);

/// The raw `Authorization` header value, retained for downstream calls that
/// need to forward the original credential.
#[derive(Debug, Clone)]
pub struct RawBearer(pub String);

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware: bearer token first, then service signature,
/// short-circuiting on the first failure.
pub async fn authenticate(
    State(auth): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match admit(&auth, &mut request) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

fn admit(auth: &AuthState, request: &mut Request<Body>) -> Result<()> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?
        .to_string();

    let token = extract_bearer_token(&header)?;
    let claims = auth.codec.verify(token)?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(claims.user));
    request.extensions_mut().insert(RawBearer(header));

    signature::validate(request.headers(), &auth.signature_secret)
}

/// Require exactly `Bearer <credential>` with a non-empty credential.
fn extract_bearer_token(header: &str) -> Result<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AppError::Unauthorized),
    }
}
