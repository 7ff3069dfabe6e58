use actix_web::middleware::Next;
use actix_web::{
    Error, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use tracing::debug;

use crate::config::Config;
use crate::errors::ApiError;

/// Rejects with 400 any request whose configured header does not carry the
/// configured value. A missing header counts as an empty value. Without a
/// `REQUIRED_HEADER` setting every request passes.
pub async fn check_header(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let rule = req
        .app_data::<Data<Config>>()
        .and_then(|config| config.required_header.clone());

    if let Some(rule) = rule {
        let actual = req
            .headers()
            .get(&rule.name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if actual != rule.value {
            debug!(header = %rule.name, actual, "Required header mismatch");
            return Ok(req.into_response(ApiError::BadRequest.error_response()));
        }
    }

    next.call(req).await
}
