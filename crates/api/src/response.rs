//! Shared response envelope types for API handlers.
//!
//! Successful responses use `{ "status": "success", "message": ..., "data": ... }`;
//! errors are rendered by [`AppError`](crate::error::AppError) with the same
//! `status`/`message` keys. These are plain values built per request, so
//! handlers never share response state.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Standard success envelope.
///
/// `data` is omitted from the JSON when `None`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 OK` with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            status: "success",
            message: message.into(),
            data: Some(data),
        })
    }

    /// `201 Created` with a payload.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(message, data))
    }
}

impl ApiResponse<()> {
    /// `200 OK` carrying only a message.
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "success",
            message: message.into(),
            data: None,
        })
    }
}
