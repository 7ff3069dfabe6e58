use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use derive_more::Display;

use crate::store::StoreError;

/// Everything a handler can fail with. The response body is always the plain
/// status reason; details only go to the log.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[display(fmt = "bad request")]
    BadRequest,
    #[display(fmt = "unauthorized")]
    Unauthorized,
    #[display(fmt = "not found")]
    NotFound,
    #[display(fmt = "internal error")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(status.canonical_reason().unwrap_or_default())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Database(_) | StoreError::Unavailable(_) => ApiError::Internal,
        }
    }
}
