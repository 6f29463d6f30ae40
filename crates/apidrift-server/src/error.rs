//! HTTP error mapping
//!
//! Every failure leaves the server as `{"error": {code, message, ...}}` with
//! a status derived from the error kind.

use apidrift_core::errors::{ExError, ExErrorKind};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error returned by handlers
#[derive(Debug, Clone)]
pub struct ApiError(pub ExError);

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            kind if kind.is_client_error() => StatusCode::BAD_REQUEST,
            ExErrorKind::NotificationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ExErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExError> for ApiError {
    fn from(err: ExError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

impl From<&ExError> for ErrorResponse {
    fn from(err: &ExError) -> Self {
        Self {
            error: ErrorDetail {
                code: err.code(),
                message: err.message().to_string(),
                side: err.side().map(|s| s.as_str()),
                field_path: err.field_path().map(str::to_string),
                entity_id: err.entity_id().map(str::to_string),
                request_id: err.request_id().map(|id| id.as_str().to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self.0));
        (status, body).into_response()
    }
}
