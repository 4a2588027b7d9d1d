//! Endpoint handlers.
//!
//! Every handler walks the same states:
//! `method check → config check → upstream call → normalize | translate`,
//! and every path ends in exactly one response.

use std::time::Instant;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::config::secrets::{GITHUB_OWNER, GITHUB_REPO, JUPITER_API_KEY, REDDIT_USERNAME};
use crate::config::CachePolicy;
use crate::error::ProxyError;
use crate::http::request::{ensure_get, required_query};
use crate::http::response::{self, ErrorEnvelope, Integration};
use crate::http::server::AppState;
use crate::integrations::{self, github, jupiter, reddit, StatusLine};
use crate::observability::metrics;
use crate::upstream::{Endpoint, UpstreamResult};

/// `GET /api/price?ids=...`
pub async fn price(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let start = Instant::now();
    let result = async {
        ensure_get(&method)?;
        let ids = required_query(&uri, "ids")?;
        let api_key = state
            .secrets
            .jupiter_api_key
            .as_deref()
            .ok_or(ProxyError::Unconfigured(JUPITER_API_KEY))?;
        let endpoint = jupiter::price_endpoint(&state.config.upstreams, api_key, &ids)?;
        let body = call(&state, jupiter::UPSTREAM, &endpoint).await?;
        integrations::passthrough_json(body)
    }
    .await;

    let response = match result {
        Ok(body) => response::json_passthrough(body, state.config.cache.price),
        Err(e) => translate("price", &e, Integration::Required, state.config.cache.fallback),
    };
    metrics::record_request("price", response.status().as_u16(), start);
    response
}

/// `GET /api/positions`
pub async fn positions(State(state): State<AppState>, method: Method) -> Response {
    let start = Instant::now();
    let result = async {
        ensure_get(&method)?;
        let api_key = state
            .secrets
            .jupiter_api_key
            .as_deref()
            .ok_or(ProxyError::Unconfigured(JUPITER_API_KEY))?;
        let endpoint = jupiter::holdings_endpoint(&state.config.upstreams, api_key)?;
        let body = call(&state, jupiter::UPSTREAM, &endpoint).await?;
        integrations::passthrough_json(body)
    }
    .await;

    let response = match result {
        Ok(body) => response::json_passthrough(body, state.config.cache.positions),
        Err(e) => translate("positions", &e, Integration::Required, state.config.cache.fallback),
    };
    metrics::record_request("positions", response.status().as_u16(), start);
    response
}

/// `GET /api/status/github`
pub async fn github_status(State(state): State<AppState>, method: Method) -> Response {
    let start = Instant::now();
    let result = async {
        ensure_get(&method)?;
        let repo = state.secrets.github_repo().ok_or_else(|| {
            let missing = if state.secrets.github_owner.is_none() {
                GITHUB_OWNER
            } else {
                GITHUB_REPO
            };
            ProxyError::Unconfigured(missing)
        })?;
        let endpoint = github::commits_endpoint(
            &state.config.upstreams,
            &repo,
            state.secrets.github_token.as_deref(),
        )?;
        let body = call(&state, github::UPSTREAM, &endpoint).await?;
        github::summarize(&repo, &body)
    }
    .await;

    let response = status_response(
        "github",
        result,
        github::LABEL,
        state.config.cache.github,
        state.config.cache.fallback,
    );
    metrics::record_request("github", response.status().as_u16(), start);
    response
}

/// `GET /api/status/reddit`
pub async fn reddit_status(State(state): State<AppState>, method: Method) -> Response {
    let start = Instant::now();
    let result = async {
        ensure_get(&method)?;
        let username = state
            .secrets
            .reddit_username
            .as_deref()
            .ok_or(ProxyError::Unconfigured(REDDIT_USERNAME))?;
        let endpoint = reddit::feed_endpoint(&state.config.upstreams, username)?;
        let body = call(&state, reddit::UPSTREAM, &endpoint).await?;
        Ok::<_, ProxyError>(reddit::summarize(&body))
    }
    .await;

    let response = status_response(
        "reddit",
        result,
        reddit::LABEL,
        state.config.cache.reddit,
        state.config.cache.fallback,
    );
    metrics::record_request("reddit", response.status().as_u16(), start);
    response
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health` liveness probe. Never touches an upstream.
pub async fn health(method: Method) -> Response {
    if ensure_get(&method).is_err() {
        return response::method_not_allowed();
    }
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
    .into_response()
}

/// Unknown paths.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope {
            error: "Not found".to_string(),
            status: None,
            body: None,
        }),
    )
        .into_response()
}

/// One upstream GET; non-2xx becomes `UpstreamFailure`.
async fn call(
    state: &AppState,
    upstream: &'static str,
    endpoint: &Endpoint,
) -> Result<Bytes, ProxyError> {
    match state.fetcher.fetch(upstream, endpoint).await? {
        UpstreamResult::Success { body, .. } => Ok(body),
        UpstreamResult::Failure { status, body } => Err(ProxyError::UpstreamFailure {
            status: status.as_u16(),
            body,
        }),
    }
}

fn status_response(
    route: &'static str,
    result: Result<StatusLine, ProxyError>,
    label: &'static str,
    cache: CachePolicy,
    fallback: CachePolicy,
) -> Response {
    match result {
        Ok(line) => response::status_line(line, cache),
        Err(e) => translate(route, &e, Integration::Optional { label }, fallback),
    }
}

fn translate(
    route: &'static str,
    err: &ProxyError,
    integration: Integration,
    fallback: CachePolicy,
) -> Response {
    match err {
        ProxyError::UpstreamFailure { status, .. } => {
            tracing::warn!(route, upstream_status = *status, "Upstream returned an error");
        }
        ProxyError::TransportFailure(message) => {
            tracing::error!(route, error = %message, "Upstream call failed");
        }
        ProxyError::Unconfigured(var) => match integration {
            Integration::Required => tracing::error!(route, missing = *var, "Required integration not configured"),
            Integration::Optional { .. } => tracing::debug!(route, missing = *var, "Integration not configured"),
        },
        ProxyError::MethodNotAllowed | ProxyError::InvalidRequest(_) => {
            tracing::debug!(route, error = %err, "Rejected request");
        }
    }
    response::render_error(err, integration, fallback)
}
