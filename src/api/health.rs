//! Health check endpoint

use axum::Json;

use crate::response::ApiResponse;

pub async fn health() -> Json<ApiResponse> {
    Json(ApiResponse::success(serde_json::json!({"healthy": true})))
}
