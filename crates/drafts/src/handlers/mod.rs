pub mod drafts;
pub mod error;
pub mod health;
pub mod rules;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use drafts_core::records::ValidationError;
use serde::Serialize;

pub use error::AppError;

/// Body returned by mutations that have nothing else to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Turns a JSON body rejection into a validation error.
pub(crate) fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ValidationError::InvalidBody(rejection.body_text()))
}
