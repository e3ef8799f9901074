//! Uniform response envelope
//!
//! Every response, success or error, uses the same JSON shape:
//! `{"status": "success"|"error", "message": ..., "data": ..., "token": ...}`.

use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = serde_json::Value> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: "OK".to_string(),
            data: Some(data),
            token: None,
        }
    }

    pub fn success_with_token(data: T, token: String) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: "OK".to_string(),
            data: Some(data),
            token: Some(token),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: STATUS_ERROR,
            message,
            data: None,
            token: None,
        }
    }

    pub fn error_with_data(message: String, data: T) -> Self {
        Self {
            status: STATUS_ERROR,
            message,
            data: Some(data),
            token: None,
        }
    }
}
