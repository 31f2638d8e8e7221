use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use huntwheel_core::errors::WheelError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Conflict(m) => write!(f, "{m}"),
        }
    }
}

impl From<WheelError> for AppError {
    fn from(err: WheelError) -> Self {
        // All core errors are recoverable caller mistakes, not 500s.
        Self::Conflict(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            Self::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
