//! Shared utilities for router-level tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode, Uri},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use presence_proxy::{HttpServer, Secrets, ServiceConfig};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// What the mock upstream saw on its most recent call.
#[derive(Debug, Clone)]
pub struct Seen {
    pub uri: String,
    pub headers: HeaderMap,
}

/// A local upstream that answers every path with one canned response.
pub struct MockUpstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Seen>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<Seen> {
        self.last.lock().unwrap().clone()
    }
}

/// Start a mock upstream on an ephemeral port.
pub async fn start_upstream(status: u16, content_type: &'static str, body: &'static str) -> MockUpstream {
    start_slow_upstream(status, content_type, body, Duration::ZERO).await
}

/// Like [`start_upstream`], but every answer is held back by `delay`.
pub async fn start_slow_upstream(
    status: u16,
    content_type: &'static str,
    body: &'static str,
    delay: Duration,
) -> MockUpstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(None));

    let app = {
        let hits = hits.clone();
        let last = last.clone();
        Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
            let hits = hits.clone();
            let last = last.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = Some(Seen {
                    uri: uri.to_string(),
                    headers,
                });
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(header::CONTENT_TYPE, content_type)],
                    body,
                )
            }
        })
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        base_url: format!("http://{}", addr),
        hits,
        last,
    }
}

/// A base URL with nothing listening behind it.
#[allow(dead_code)]
pub async fn dead_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Router with every upstream pointed at `base_url`.
pub fn app(base_url: &str, secrets: Secrets) -> Router {
    app_with(base_url, secrets, |_| {})
}

/// [`app`] with a hook to adjust the config before the router is built.
pub fn app_with(base_url: &str, secrets: Secrets, adjust: impl FnOnce(&mut ServiceConfig)) -> Router {
    let mut config = ServiceConfig::default();
    config.upstreams.jupiter_base_url = base_url.to_string();
    config.upstreams.github_base_url = base_url.to_string();
    config.upstreams.reddit_base_url = base_url.to_string();
    config.upstreams.wallet_address = "Wallet111".to_string();
    adjust(&mut config);
    HttpServer::new(config, secrets).unwrap().router()
}

/// Secrets with every integration configured.
#[allow(dead_code)]
pub fn full_secrets() -> Secrets {
    Secrets {
        jupiter_api_key: Some("test-key".into()),
        github_owner: Some("matty".into()),
        github_repo: Some("site".into()),
        github_token: None,
        reddit_username: Some("matty".into()),
    }
}

pub async fn send(app: Router, method: &str, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_bytes(response: Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[allow(dead_code)]
pub fn cache_control(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
