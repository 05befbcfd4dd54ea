// Application error taxonomy and result alias

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::diameters::DiameterError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("File not found")]
    FileNotFound,

    #[error("Route not found")]
    RouteNotFound,

    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("Only image files are allowed")]
    InvalidFileType,

    #[error("File size exceeds the maximum limit of {0} bytes")]
    FileTooLarge(usize),

    #[error("Invalid UUID format")]
    InvalidUuid,

    #[error("Invalid file")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Failed to serve file")]
    FailedToServeFile,

    #[error("{0}")]
    Diameters(#[from] DiameterError),

    #[error("Internal server error")]
    Io(#[from] std::io::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR"),
            AppError::FileNotFound => (StatusCode::NOT_FOUND, "FILE_NOT_FOUND"),
            AppError::RouteNotFound => (StatusCode::NOT_FOUND, "ROUTE_NOT_FOUND"),
            AppError::NoFileUploaded => (StatusCode::BAD_REQUEST, "NO_FILE_UPLOADED"),
            AppError::InvalidFileType => (StatusCode::BAD_REQUEST, "INVALID_FILE_TYPE"),
            AppError::FileTooLarge(_) => (StatusCode::BAD_REQUEST, "FILE_TOO_LARGE"),
            AppError::InvalidUuid => (StatusCode::BAD_REQUEST, "INVALID_UUID"),
            AppError::Multipart(_) => (StatusCode::BAD_REQUEST, "INVALID_FILE"),
            AppError::FailedToServeFile => {
                (StatusCode::INTERNAL_SERVER_ERROR, "FAILED_TO_SERVE_FILE")
            }
            AppError::Diameters(_) | AppError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            error!("Handled error: {} | Code: {}", self, code);
        } else {
            warn!("Handled error: {} | Code: {}", self, code);
        }

        let body = Json(serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": code,
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
