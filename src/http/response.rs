//! Response envelopes and failure translation.
//!
//! # Responsibilities
//! - Emit pass-through JSON and status-line successes with Cache-Control
//! - Map `ProxyError` to status code and envelope per integration policy
//!
//! # Design Decisions
//! - Required integrations fail hard when unconfigured (500); optional ones
//!   degrade to a neutral 200 the UI can render as "no data"
//! - Required-integration errors carry no Cache-Control; everything an
//!   optional integration emits does
//! - Upstream status codes are propagated unchanged

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::config::CachePolicy;
use crate::error::ProxyError;
use crate::integrations::StatusLine;

/// How an integration's failures are presented to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integration {
    /// The feature is unusable without it; misconfiguration is a 500.
    Required,
    /// A nice-to-have widget; misconfiguration is a neutral 200.
    Optional { label: &'static str },
}

/// Error body for required integrations: `{error, status?, body?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Body for optional integrations, success or not: `{ok, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEnvelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl StatusEnvelope {
    fn failure(error: String) -> Self {
        Self {
            ok: false,
            message: None,
            link: None,
            error: Some(error),
            status: None,
            body: None,
        }
    }
}

impl From<StatusLine> for StatusEnvelope {
    fn from(line: StatusLine) -> Self {
        Self {
            ok: true,
            message: Some(line.message),
            link: line.link,
            error: None,
            status: None,
            body: None,
        }
    }
}

/// 200 with the upstream JSON bytes as-is.
pub fn json_passthrough(body: Bytes, cache: CachePolicy) -> Response {
    let mut response = Response::new(Body::from(body));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    with_cache(response, cache)
}

/// 200 `{ok: true, message, link?}`.
pub fn status_line(line: StatusLine, cache: CachePolicy) -> Response {
    with_cache(Json(StatusEnvelope::from(line)).into_response(), cache)
}

/// Translate a request-path error into its single terminal response.
///
/// `fallback` is the cache policy applied to everything an optional
/// integration emits on its unhappy paths.
pub fn render_error(err: &ProxyError, integration: Integration, fallback: CachePolicy) -> Response {
    if *err == ProxyError::MethodNotAllowed {
        return method_not_allowed();
    }

    let status = err.status_code();
    match integration {
        Integration::Required => {
            let envelope = match err {
                ProxyError::UpstreamFailure { status, body } => ErrorEnvelope {
                    error: err.to_string(),
                    status: Some(*status),
                    body: Some(body.clone()),
                },
                _ => ErrorEnvelope {
                    error: err.to_string(),
                    status: None,
                    body: None,
                },
            };
            (status, Json(envelope)).into_response()
        }
        Integration::Optional { label } => {
            let (status, envelope) = match err {
                ProxyError::Unconfigured(_) => (
                    StatusCode::OK,
                    StatusEnvelope {
                        error: None,
                        message: Some(format!("{}: not configured", label)),
                        ..StatusEnvelope::failure(String::new())
                    },
                ),
                ProxyError::UpstreamFailure {
                    status: upstream,
                    body,
                } => (
                    status,
                    StatusEnvelope {
                        status: Some(*upstream),
                        body: Some(body.clone()),
                        ..StatusEnvelope::failure(err.to_string())
                    },
                ),
                _ => (status, StatusEnvelope::failure(err.to_string())),
            };
            with_cache((status, Json(envelope)).into_response(), fallback)
        }
    }
}

/// 405 `{error: "Method not allowed"}` with `Allow: GET`.
pub fn method_not_allowed() -> Response {
    let mut response = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorEnvelope {
            error: ProxyError::MethodNotAllowed.to_string(),
            status: None,
            body: None,
        }),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET"));
    response
}

fn with_cache(mut response: Response, cache: CachePolicy) -> Response {
    if let Ok(value) = HeaderValue::from_str(&cache.header_value()) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    response
}
