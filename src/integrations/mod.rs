//! Per-upstream endpoint builders and response normalizers.
//!
//! # Data Flow
//! ```text
//! config + secrets
//!     → <integration>::*_endpoint (Endpoint)
//!     → upstream::UpstreamFetcher
//!     → passthrough_json (jupiter) | summarize (github, reddit)
//! ```
//!
//! Jupiter is a required integration: the site's portfolio widgets are
//! useless without it. GitHub and Reddit are optional status lines.

pub mod github;
pub mod jupiter;
pub mod reddit;

use bytes::Bytes;
use serde::de::IgnoredAny;

use crate::error::ProxyError;

/// Normalized payload for an optional status integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub link: Option<String>,
}

/// Forward a JSON body untouched, after checking it is well-formed.
pub fn passthrough_json(body: Bytes) -> Result<Bytes, ProxyError> {
    serde_json::from_slice::<IgnoredAny>(&body)
        .map_err(|e| ProxyError::TransportFailure(format!("malformed upstream JSON: {}", e)))?;
    Ok(body)
}

pub(crate) fn header_error(name: &str) -> ProxyError {
    ProxyError::TransportFailure(format!("invalid {} header value", name))
}

pub(crate) fn url_error(e: url::ParseError) -> ProxyError {
    ProxyError::TransportFailure(format!("invalid upstream URL: {}", e))
}
