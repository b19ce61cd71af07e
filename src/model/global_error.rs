use actix_web::{HttpResponse, ResponseError};
use actix_web::http::StatusCode;
use thiserror::Error;
use std::fmt;
use crate::model::common::ApiResponse;
use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 400 BAD REQUEST
    ValidationFailed,
    InvalidRequestBody,
    InvalidQueryString,

    // 404 NOT FOUND
    BugNotFound,

    // 500 SERVER ERRORS
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequestBody => "Invalid request body",
            ErrorCode::InvalidQueryString => "Invalid query string",

            ErrorCode::BugNotFound => "Bug not found",

            ErrorCode::DatabaseError => "A database error occurred",
            ErrorCode::InternalError => "Internal server error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed |
            ErrorCode::InvalidRequestBody |
            ErrorCode::InvalidQueryString => StatusCode::BAD_REQUEST,

            ErrorCode::BugNotFound => StatusCode::NOT_FOUND,

            ErrorCode::DatabaseError |
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ApiError(ErrorCode, Option<String>),
    #[error("validation failed: {}", .0.join(", "))]
    ValidationError(Vec<String>),
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        AppError::ApiError(code, Some(detail.into()))
    }

    pub fn not_found() -> Self {
        Self::new(ErrorCode::BugNotFound)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::ApiError(code, _) => *code,
            AppError::ValidationError(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::with_detail(ErrorCode::DatabaseError, err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.code().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let response = match self {
            AppError::ValidationError(errors) => {
                ApiResponse::failure(ErrorCode::ValidationFailed.message(), Some(errors.clone()))
            }
            AppError::ApiError(code, detail) => {
                // detail is for the log only; 5xx bodies stay generic
                if let Some(detail) = detail {
                    if code.status_code().is_server_error() {
                        tracing::error!(code = ?code, detail = %detail, "request failed");
                    } else {
                        tracing::warn!(code = ?code, detail = %detail, "request rejected");
                    }
                }
                ApiResponse::failure(code.message(), None)
            }
        };

        HttpResponse::build(self.status_code()).json(response)
    }
}
