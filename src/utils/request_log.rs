use std::time::{Duration, Instant};

use actix_web::middleware::Next;
use actix_web::{
    Error,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
};
use tracing::{info, warn};
use uuid::Uuid;

/// Logs a START line before and a FINISH line after every request.
pub async fn request_log(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let request_id = Uuid::new_v4();
    let method = req.method().to_string();
    let path = req.path().to_owned();
    let started = Instant::now();

    info!(%request_id, %method, %path, "START");

    let res = next.call(req).await;

    let elapsed_ms = elapsed_millis(started.elapsed());
    match &res {
        Ok(resp) => info!(
            %request_id,
            %method,
            %path,
            status = resp.status().as_u16(),
            elapsed_ms,
            "FINISH"
        ),
        Err(e) => warn!(%request_id, %method, %path, error = %e, elapsed_ms, "FINISH"),
    }

    res
}

fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
