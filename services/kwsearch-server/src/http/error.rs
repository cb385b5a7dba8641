//! HTTP mapping of core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::KwSearchError;

/// Status code reported for an error
pub fn status_code(err: &KwSearchError) -> StatusCode {
    match err {
        KwSearchError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        KwSearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        KwSearchError::InvalidSnapshot(_)
        | KwSearchError::ConfigError(_)
        | KwSearchError::IoError(_)
        | KwSearchError::SerdeError(_)
        | KwSearchError::TomlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for KwSearchError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request could not be served");
        }

        let body = Json(json!({
            "error": self.message(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
