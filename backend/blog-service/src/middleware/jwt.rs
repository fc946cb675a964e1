//! Fail-open JWT middleware
//!
//! Every request passes through. A verifiable bearer token attaches an
//! `AuthenticatedUser` to the request extensions; anything else (no header,
//! odd header shape, bad signature, expired token) leaves the request
//! anonymous. Operations decide for themselves whether identity is required.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use crypto_core::jwt::{Claims, JwtKeys};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Identity attached to a request whose token verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_uuid()?,
            email: claims.email.clone(),
        })
    }
}

/// Split an `Authorization` value into its token.
///
/// Only the two-segment `<scheme> <token>` shape is recognised; any other
/// shape yields `None` and the request is treated as anonymous.
pub fn extract_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    let _scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(token)
}

/// Resolve an optional `Authorization` value to verified claims.
///
/// Never fails: every rejection collapses to `None`.
pub fn identify(header_value: Option<&str>, keys: &JwtKeys) -> Option<Claims> {
    let header_value = header_value?;

    let Some(token) = extract_token(header_value) else {
        debug!("Authorization header is not of the form '<scheme> <token>'");
        return None;
    };

    match keys.verify(token) {
        Ok(claims) if !claims.user_id.is_empty() => Some(claims),
        Ok(_) => {
            debug!("Token verified but carries no user id");
            None
        }
        Err(e) => {
            debug!(error = %e, "Token rejected, continuing without identity");
            None
        }
    }
}

/// JWT authentication middleware
#[derive(Clone)]
pub struct JwtMiddleware {
    keys: Arc<JwtKeys>,
}

impl JwtMiddleware {
    pub fn new(keys: Arc<JwtKeys>) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtMiddlewareService {
            service,
            keys: self.keys.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: S,
    keys: Arc<JwtKeys>,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header_value = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let user = identify(header_value, &self.keys)
            .as_ref()
            .and_then(AuthenticatedUser::from_claims);

        if let Some(user) = user {
            debug!(user_id = %user.user_id, "Request authenticated");
            req.extensions_mut().insert(user);
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, web, App, HttpRequest, HttpResponse};
    use chrono::{Duration, Utc};

    const SECRET: &str = "middleware-test-secret-0123456789abcdef";

    fn keys() -> Arc<JwtKeys> {
        Arc::new(JwtKeys::from_secret(SECRET).unwrap())
    }

    /// Echoes the attached identity, or "anonymous"
    async fn whoami(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => HttpResponse::Ok().body(user.user_id.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    async fn call_with(header: Option<String>) -> (u16, String) {
        let app = actix_test::init_service(
            App::new()
                .wrap(JwtMiddleware::new(keys()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let mut req = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            req = req.insert_header(("Authorization", value));
        }

        let resp = actix_test::call_service(&app, req.to_request()).await;
        let status = resp.status().as_u16();
        let body = actix_test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_extract_token_shapes() {
        assert_eq!(extract_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token("Token abc"), Some("abc"));
        assert_eq!(extract_token("Bearer   abc"), Some("abc"));
        assert_eq!(extract_token("abc.def.ghi"), None);
        assert_eq!(extract_token("Bearer"), None);
        assert_eq!(extract_token(""), None);
        assert_eq!(extract_token("Bearer abc extra"), None);
    }

    #[test]
    fn test_identify_never_panics_on_garbage() {
        let keys = keys();
        for header in ["", "Bearer", "Bearer ", "Bearer x.y.z", "Bearer a b c", "\u{0}"] {
            assert!(identify(Some(header), &keys).is_none());
        }
        assert!(identify(None, &keys).is_none());
    }

    #[actix_web::test]
    async fn test_valid_token_attaches_identity() {
        let user_id = Uuid::new_v4();
        let token = keys().issue(user_id, "reader@example.com").unwrap();

        let (status, body) = call_with(Some(format!("Bearer {}", token))).await;
        assert_eq!(status, 200);
        assert_eq!(body, user_id.to_string());
    }

    #[actix_web::test]
    async fn test_missing_header_passes_through_anonymous() {
        let (status, body) = call_with(None).await;
        assert_eq!(status, 200);
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_expired_token_passes_through_anonymous() {
        let issued = Utc::now() - Duration::hours(2);
        let token = keys().issue_at(Uuid::new_v4(), "a@b.io", issued).unwrap();

        let (status, body) = call_with(Some(format!("Bearer {}", token))).await;
        assert_eq!(status, 200);
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_foreign_signature_passes_through_anonymous() {
        let other = JwtKeys::from_secret("some-other-secret-0123456789abcdefgh").unwrap();
        let token = other.issue(Uuid::new_v4(), "a@b.io").unwrap();

        let (status, body) = call_with(Some(format!("Bearer {}", token))).await;
        assert_eq!(status, 200);
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_malformed_headers_pass_through_anonymous() {
        for header in ["Bearer", "not-a-jwt", "Bearer not.a.jwt", "Bearer a b"] {
            let (status, body) = call_with(Some(header.to_string())).await;
            assert_eq!(status, 200, "header {:?}", header);
            assert_eq!(body, "anonymous", "header {:?}", header);
        }
    }

    #[actix_web::test]
    async fn test_bare_token_without_scheme_is_anonymous() {
        let token = keys().issue(Uuid::new_v4(), "a@b.io").unwrap();

        let (status, body) = call_with(Some(token)).await;
        assert_eq!(status, 200);
        assert_eq!(body, "anonymous");
    }
}
