use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chat_core::ChatError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::Chat(ChatError::Validation(_)) => "validation_error",
            AppError::Chat(ChatError::NotFound(_))
            | AppError::Chat(ChatError::InvalidRole { .. }) => "not_found",
            AppError::Chat(ChatError::Upstream(_)) => "upstream_error",
            AppError::Unauthorized(_) | AppError::Chat(ChatError::Unauthorized(_)) => {
                "unauthorized"
            }
            _ => "api_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Chat(ChatError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Chat(ChatError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Chat(ChatError::InvalidRole { .. }) => StatusCode::NOT_FOUND,
            AppError::Chat(ChatError::Unauthorized(_)) | AppError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Chat(ChatError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Chat(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_response = JsonErrorWrapper {
            error: JsonError {
                message: self.to_string(),
                r#type: self.error_type().to_string(),
            },
        };
        HttpResponse::build(status_code).json(error_response)
    }
}
