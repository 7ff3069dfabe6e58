use crate::auth::verifier::CredentialVerifier;
use crate::errors::ApiError;
use actix_web::middleware::Next;
use actix_web::{
    Error, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{AUTHORIZATION, HeaderMap},
    web::Data,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::{debug, error};

#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub login: String,
    pub password: String,
}

/// Extracts `login:password` from `Authorization: Basic <base64>`.
///
/// `None` for a missing header, a scheme other than `Basic`, a payload that is
/// not base64 or not UTF-8, and a payload without a colon.
pub fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, payload) = value.split_once(' ')?;
    if scheme != "Basic" {
        return None;
    }

    let decoded = String::from_utf8(STANDARD.decode(payload).ok()?).ok()?;
    let (login, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        login: login.to_owned(),
        password: password.to_owned(),
    })
}

/// Authentication gate. Every request is checked against the manager store;
/// nothing is remembered between requests. On success the request goes on
/// untouched.
pub async fn basic_auth(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let Some(credentials) = basic_credentials(req.headers()) else {
        debug!(path = %req.path(), "Missing or malformed Basic credentials");
        return Ok(req.into_response(ApiError::Unauthorized.error_response()));
    };

    let verifier = match req.app_data::<Data<dyn CredentialVerifier>>() {
        Some(v) => v.clone(),
        None => {
            error!("Credential verifier is not registered");
            return Ok(req.into_response(ApiError::Internal.error_response()));
        }
    };

    if !verifier
        .verify(&credentials.login, &credentials.password)
        .await
    {
        debug!(login = %credentials.login, path = %req.path(), "Credentials rejected");
        return Ok(req.into_response(ApiError::Unauthorized.error_response()));
    }

    next.call(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verifier::InMemoryCredentialVerifier;
    use crate::test_utils::basic_header;
    use actix_web::{
        App, HttpResponse,
        http::{StatusCode, header::HeaderValue},
        middleware::from_fn,
        test::{TestRequest, call_service, init_service},
        web,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Hits(AtomicUsize);

    async fn guarded(hits: web::Data<Hits>) -> HttpResponse {
        hits.0.fetch_add(1, Ordering::SeqCst);
        HttpResponse::Ok().finish()
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn parses_well_formed_basic_header() {
        // "admin:se:cret": only the first colon separates login from password
        let creds = basic_credentials(&headers_with("Basic YWRtaW46c2U6Y3JldA==")).unwrap();
        assert_eq!(
            creds,
            BasicCredentials {
                login: "admin".into(),
                password: "se:cret".into()
            }
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
        assert_eq!(basic_credentials(&headers_with("Basic")), None);
        assert_eq!(basic_credentials(&headers_with("basic YWRtaW46c2VjcmV0")), None);
        assert_eq!(basic_credentials(&headers_with("Bearer YWRtaW46c2VjcmV0")), None);
        assert_eq!(basic_credentials(&headers_with("Basic not-base64!")), None);
        // "adminsecret", no colon
        assert_eq!(basic_credentials(&headers_with("Basic YWRtaW5zZWNyZXQ=")), None);
        assert_eq!(basic_credentials(&headers_with("Basic YWRtaW46c2VjcmV0 extra")), None);
    }

    #[actix_web::test]
    async fn gate_only_forwards_valid_credentials() {
        let hits = web::Data::new(Hits::default());
        let verifier: Arc<dyn CredentialVerifier> =
            Arc::new(InMemoryCredentialVerifier::new([("admin", "secret")]));
        let app = init_service(
            App::new()
                .app_data(Data::from(verifier))
                .app_data(hits.clone())
                .service(
                    web::scope("/guarded")
                        .wrap(from_fn(basic_auth))
                        .route("", web::get().to(guarded)),
                ),
        )
        .await;

        let rejected = [
            None,
            Some("Bearer token".to_string()),
            Some(basic_header("admin", "wrong")),
            Some(basic_header("nobody", "secret")),
            Some(basic_header("", "")),
        ];
        for header in rejected {
            let mut req = TestRequest::get().uri("/guarded");
            if let Some(h) = header {
                req = req.insert_header((AUTHORIZATION, h));
            }
            let resp = call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(hits.0.load(Ordering::SeqCst), 0);

        let req = TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, basic_header("admin", "secret")))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(hits.0.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn gate_without_verifier_is_an_internal_error() {
        let app = init_service(
            App::new().service(
                web::scope("/guarded")
                    .wrap(from_fn(basic_auth))
                    .route("", web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let req = TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, basic_header("admin", "secret")))
            .to_request();
        let resp = call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
