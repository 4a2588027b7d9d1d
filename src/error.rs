//! Request-path error taxonomy.
//!
//! Every failure a handler can hit is one of these variants. None of them
//! is fatal to the process; each is rendered into exactly one response by
//! [`crate::http::response`], according to the integration's policy.

use axum::http::StatusCode;
use thiserror::Error;

use crate::upstream::TransportError;

/// Generic message when a transport fault carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    /// Anything other than GET.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A required environment value is absent. Carries the variable name.
    #[error("{0} not configured")]
    Unconfigured(&'static str),

    /// Missing or malformed query parameter.
    #[error("{0}")]
    InvalidRequest(String),

    /// The upstream answered with a non-2xx status.
    #[error("Upstream error")]
    UpstreamFailure { status: u16, body: String },

    /// Network fault or an upstream body we could not read.
    #[error("{}", transport_message(.0))]
    TransportFailure(String),
}

fn transport_message(message: &str) -> &str {
    if message.trim().is_empty() {
        UNKNOWN_ERROR
    } else {
        message
    }
}

impl ProxyError {
    /// HTTP status the error maps to when it is surfaced as a failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unconfigured(_) | Self::TransportFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamFailure { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl From<TransportError> for ProxyError {
    fn from(err: TransportError) -> Self {
        Self::TransportFailure(err.to_string())
    }
}
