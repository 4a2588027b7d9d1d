//! Request identification and inspection helpers.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID when the caller did not send one
//! - Build the per-request tracing span around that ID
//! - Enforce the GET-only contract and read required query parameters
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Method and query checks run before secrets or upstreams are touched

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, Uri},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::error::ProxyError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Span for tower-http's `TraceLayer`, tagged with the request ID.
pub fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Only GET is served.
pub fn ensure_get(method: &Method) -> Result<(), ProxyError> {
    if *method == Method::GET {
        Ok(())
    } else {
        Err(ProxyError::MethodNotAllowed)
    }
}

/// First value of query parameter `name`, trimmed; blank counts as missing.
pub fn required_query(uri: &Uri, name: &str) -> Result<String, ProxyError> {
    uri.query()
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.trim().to_string())
        })
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ProxyError::InvalidRequest(format!("Missing required query parameter '{}'", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_get_passes() {
        assert!(ensure_get(&Method::GET).is_ok());
        for method in [Method::POST, Method::HEAD, Method::DELETE, Method::PUT] {
            assert_eq!(ensure_get(&method), Err(ProxyError::MethodNotAllowed));
        }
    }

    #[test]
    fn query_value_is_decoded() {
        let uri: Uri = "/api/price?foo=1&ids=SOL%2CJUP".parse().unwrap();
        assert_eq!(required_query(&uri, "ids").unwrap(), "SOL,JUP");
    }

    #[test]
    fn missing_or_blank_query_is_invalid() {
        for uri in ["/api/price", "/api/price?ids=", "/api/price?ids=+++", "/api/price?other=1"] {
            let uri: Uri = uri.parse().unwrap();
            assert!(matches!(
                required_query(&uri, "ids"),
                Err(ProxyError::InvalidRequest(_))
            ));
        }
    }

    #[test]
    fn request_ids_are_unique() {
        let mut make = UuidRequestId;
        let request = Request::new(());
        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
