//! User API handlers (protected routes)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::domain::{StringUuid, UpdateUserInput, UserResponse};
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::response::ApiResponse;
use crate::server::AppState;

/// `GET /api/v1/users/me`
///
/// Answers straight from the token claims attached by the authentication
/// middleware; no database round trip.
pub async fn current_user(
    AuthenticatedUser(user): AuthenticatedUser,
) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::success(user))
}

/// `GET /api/v1/users/{uuid}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(uuid): Path<StringUuid>,
) -> Result<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_by_uuid(uuid).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// `PUT /api/v1/users/{uuid}`
pub async fn update_user(
    State(state): State<AppState>,
    Path(uuid): Path<StringUuid>,
    Json(payload): Json<UpdateUserInput>,
) -> Result<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.update(uuid, payload).await?;
    Ok(Json(ApiResponse::success(user)))
}
