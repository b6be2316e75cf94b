use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "User already exists";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum AppError {
    DuplicateAccount,
    ValidationFailure(String),
    StoreUnavailable(String),
    StoreWriteError(String),
    Configuration(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DuplicateAccount => write!(f, "{}", DUPLICATE_ACCOUNT_MESSAGE),
            AppError::ValidationFailure(msg) => write!(f, "{}", msg),
            AppError::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            AppError::StoreWriteError(msg) => write!(f, "Store write error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateAccount => StatusCode::CONFLICT,
            AppError::ValidationFailure(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_)
            | AppError::StoreWriteError(_)
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store details stay in the logs
        let error = match self {
            AppError::DuplicateAccount | AppError::ValidationFailure(_) => self.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { error })
    }
}
