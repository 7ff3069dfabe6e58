use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::warn;

use crate::errors::ApiError;
use crate::store::StoreError;

/// Parses a customer id taken from a path segment or query parameter.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|e| {
        warn!(id = raw, error = %e, "Rejecting non-numeric customer id");
        ApiError::BadRequest
    })
}

/// Turns a store result into a 200 JSON response or the matching error status.
pub fn reply<T: Serialize>(result: Result<T, StoreError>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(result?))
}

fn reject_payload(err: impl std::fmt::Display, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = %req.path(), "Rejecting undecodable request input");
    ApiError::BadRequest.into()
}

/// JSON bodies are decoded whatever the declared content type.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, req| reject_payload(err, req))
}

pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, req| reject_payload(err, req))
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| reject_payload(err, req))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_64_bit_integers() {
        assert_eq!(parse_id("42"), Ok(42));
        assert_eq!(parse_id("0"), Ok(0));
        assert_eq!(parse_id("-3"), Ok(-3));
        assert_eq!(parse_id("9223372036854775807"), Ok(i64::MAX));

        for raw in ["", "abc", "1.5", " 7", "9223372036854775808", "active"] {
            assert_eq!(parse_id(raw), Err(ApiError::BadRequest), "{raw:?}");
        }
    }
}
