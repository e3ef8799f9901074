//! Authentication API handlers (public routes)

use axum::{extract::State, Json};

use crate::domain::{LoginRequest, RegisterRequest, UserResponse};
use crate::error::Result;
use crate::response::ApiResponse;
use crate::server::AppState;

/// `POST /api/v1/auth/login`
///
/// On success the envelope carries both the user summary and a fresh
/// session token. Credential failures never say which part was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserResponse>>> {
    let (user, token) = state.user_service.login(payload).await?;
    Ok(Json(ApiResponse::success_with_token(user, token)))
}

/// `POST /api/v1/auth/register`
///
/// Creates an account with the fixed `user` role. No token is issued;
/// the client logs in afterwards.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.register(payload).await?;
    Ok(Json(ApiResponse::success(user)))
}
