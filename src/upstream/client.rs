//! Single-shot upstream HTTP client.
//!
//! # Responsibilities
//! - Perform exactly one GET per call, no retries
//! - Hand back status and raw body for every HTTP status
//! - Surface only transport faults as errors
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` shared by all handlers; the pool is the
//!   only thing shared between requests
//! - No per-call timeout; the inbound request deadline bounds the call

use std::error::Error as _;
use std::time::Instant;

use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

use crate::observability::metrics;
use crate::upstream::Endpoint;

/// Outcome of an upstream call that got an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamResult {
    /// 2xx with the raw body.
    Success { status: StatusCode, body: Bytes },
    /// Any other status, body decoded lossily for diagnostics.
    Failure { status: StatusCode, body: String },
}

impl UpstreamResult {
    fn from_parts(status: StatusCode, body: Bytes) -> Self {
        if status.is_success() {
            Self::Success { status, body }
        } else {
            Self::Failure {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }
}

/// DNS, connect, reset, or body-read failure.
#[derive(Debug, Error)]
#[error("{}", describe(.0))]
pub struct TransportError(#[from] reqwest::Error);

// reqwest's top-level message is generic ("error sending request for url");
// the useful part is in the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Executes [`Endpoint`]s.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: reqwest::Client,
}

impl UpstreamFetcher {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Issue one GET. `upstream` names the integration for logs and metrics.
    pub async fn fetch(
        &self,
        upstream: &'static str,
        endpoint: &Endpoint,
    ) -> Result<UpstreamResult, TransportError> {
        let start = Instant::now();

        let response = self
            .client
            .get(endpoint.url.clone())
            .headers(endpoint.headers.clone())
            .send()
            .await;

        let result = match response {
            Ok(response) => {
                let status = response.status();
                response
                    .bytes()
                    .await
                    .map(|body| UpstreamResult::from_parts(status, body))
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(outcome) => {
                tracing::debug!(
                    upstream,
                    host = %endpoint.host(),
                    status = outcome.status().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream responded"
                );
                let label = if outcome.status().is_success() { "success" } else { "failure" };
                metrics::record_upstream(upstream, label, start);
            }
            Err(e) => {
                tracing::debug!(
                    upstream,
                    host = %endpoint.host(),
                    error = %e,
                    "Upstream transport fault"
                );
                metrics::record_upstream(upstream, "transport", start);
            }
        }

        result.map_err(TransportError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, routing::get, Router};
    use reqwest::header::HeaderName;
    use url::Url;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn non_success_status_is_not_an_error() {
        let base = serve(Router::new().route(
            "/",
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        ))
        .await;

        let fetcher = UpstreamFetcher::new().unwrap();
        let endpoint = Endpoint::new(Url::parse(&base).unwrap());
        let result = fetcher.fetch("test", &endpoint).await.unwrap();

        assert_eq!(
            result,
            UpstreamResult::Failure {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "maintenance".into(),
            }
        );
    }

    #[tokio::test]
    async fn headers_are_attached() {
        let base = serve(Router::new().route(
            "/",
            get(|headers: HeaderMap| async move {
                headers
                    .get("x-api-key")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("missing")
                    .to_string()
            }),
        ))
        .await;

        let fetcher = UpstreamFetcher::new().unwrap();
        let endpoint = Endpoint::new(Url::parse(&base).unwrap())
            .header(HeaderName::from_static("x-api-key"), "k1")
            .unwrap();

        match fetcher.fetch("test", &endpoint).await.unwrap() {
            UpstreamResult::Success { status, body } => {
                assert_eq!(status, StatusCode::OK);
                assert_eq!(&body[..], b"k1");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = UpstreamFetcher::new().unwrap();
        let endpoint = Endpoint::new(Url::parse(&format!("http://{}", addr)).unwrap());
        let err = fetcher.fetch("test", &endpoint).await.unwrap_err();

        assert!(!err.to_string().is_empty());
    }
}
