use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use drafts_core::records::{RecordError, ValidationError};
use drafts_core::storage::{
    record_error_to_status_code, repository_error_to_status_code, validation_error_to_status_code,
    RepositoryError,
};
use serde_json::json;

/// Application error type that wraps `anyhow::Error`.
///
/// Core errors keep their own status code, anything else is a 500.
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        let code = if let Some(e) = self.0.downcast_ref::<RecordError>() {
            record_error_to_status_code(e)
        } else if let Some(e) = self.0.downcast_ref::<ValidationError>() {
            validation_error_to_status_code(e)
        } else if let Some(e) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(e)
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, status = status_code.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self.0, status = status_code.as_u16(), "Request rejected");
        }

        (status_code, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
