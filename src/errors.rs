use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::news::pipeline::PipelineError;

/// Error returned at the API boundary. Responses always carry a JSON object
/// with an `error` field.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    SqlError(#[from] sqlx::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid<T: Into<String>>(message: T) -> Self {
        ApiError::InvalidRequest(message.into())
    }

    pub fn not_found<T: Into<String>>(message: T) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::UnknownStock(_) => ApiError::not_found("Stock not found."),
            PipelineError::SqlError(error) => ApiError::SqlError(error),
            other => ApiError::UnexpectedError(anyhow::Error::new(other)),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
