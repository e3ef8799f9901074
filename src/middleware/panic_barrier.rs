//! Last-resort fault barrier
//!
//! Wraps the whole router through `CatchPanicLayer::custom(handle_panic)`.
//! Any panic in a handler or downstream layer is logged and converted into
//! the uniform 500 error envelope; one request's fault never takes down the
//! process or leaks across requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;

use crate::response::ApiResponse;

/// Convert a caught panic payload into the uniform failure response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("recovered from panic in request handler: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<serde_json::Value>::error(
            "internal server error".to_string(),
        )),
    )
        .into_response()
}
