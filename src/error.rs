use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::models::InventoryError;

/// Errors returned from handlers. Every variant is scoped to the request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        let msg = err.to_string();
        match err {
            InventoryError::BinNotFound(_) | InventoryError::ItemNotFound(_) => AppError::NotFound(msg),
            InventoryError::DuplicateBin(_) | InventoryError::DuplicateItem(_) => AppError::Conflict(msg),
            InventoryError::InvalidQuantity(_) | InventoryError::Validation(_) => AppError::BadRequest(msg),
        }
    }
}

/// Any body that fails to parse is a malformed request (400), including the
/// cases axum would otherwise report as 415 or 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Ids in the URL that are not integers, or do not fit in one.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        warn!(status = status.as_u16(), error = %msg, "Request rejected");
        (status, Json(json!({ "error": msg }))).into_response()
    }
}
