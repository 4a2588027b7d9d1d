//! Configuration schema definitions.
//!
//! This module defines the service settings loaded from the TOML file.
//! Secrets live in [`crate::config::secrets`] and never appear here.

use serde::{Deserialize, Serialize};

/// Root configuration for the presence proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Inbound request deadline.
    pub timeouts: TimeoutConfig,

    /// Upstream base URLs and client identity.
    pub upstreams: UpstreamConfig,

    /// Cache-Control lifetimes per endpoint.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time an inbound request may take, in seconds.
    ///
    /// Upstream calls carry no deadline of their own; when this fires the
    /// in-flight upstream future is dropped with the request.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Third-party endpoints and the identity we present to them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Jupiter API base (price and holdings).
    pub jupiter_base_url: String,

    /// Wallet whose holdings back the position lookup.
    pub wallet_address: String,

    /// GitHub REST API base.
    pub github_base_url: String,

    /// Reddit base for user feeds.
    pub reddit_base_url: String,

    /// User-Agent sent to every upstream. GitHub and Reddit reject
    /// anonymous clients.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            jupiter_base_url: "https://api.jup.ag".to_string(),
            wallet_address: "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1".to_string(),
            github_base_url: "https://api.github.com".to_string(),
            reddit_base_url: "https://www.reddit.com".to_string(),
            user_agent: concat!("presence-proxy/", env!("CARGO_PKG_VERSION"), " (+https://matty.lol)")
                .to_string(),
        }
    }
}

/// A `Cache-Control` lifetime pair for a downstream CDN.
///
/// A section that omits `stale_while_revalidate` gets twice `s_maxage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawCachePolicy")]
pub struct CachePolicy {
    /// Seconds the shared cache may serve the response as fresh.
    pub s_maxage: u32,

    /// Seconds a stale response may be served while revalidating.
    pub stale_while_revalidate: u32,
}

impl CachePolicy {
    pub const fn new(s_maxage: u32, stale_while_revalidate: u32) -> Self {
        Self {
            s_maxage,
            stale_while_revalidate,
        }
    }

    /// Render as a `Cache-Control` header value.
    pub fn header_value(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate={}",
            self.s_maxage, self.stale_while_revalidate
        )
    }
}

#[derive(Deserialize)]
struct RawCachePolicy {
    s_maxage: u32,
    stale_while_revalidate: Option<u32>,
}

impl From<RawCachePolicy> for CachePolicy {
    fn from(raw: RawCachePolicy) -> Self {
        let swr = raw
            .stale_while_revalidate
            .unwrap_or_else(|| raw.s_maxage.saturating_mul(2));
        Self::new(raw.s_maxage, swr)
    }
}

/// Cache lifetimes per endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub price: CachePolicy,
    pub positions: CachePolicy,
    pub github: CachePolicy,
    pub reddit: CachePolicy,

    /// Used for "not configured" and optional-integration error responses.
    pub fallback: CachePolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            price: CachePolicy::new(30, 60),
            positions: CachePolicy::new(30, 60),
            github: CachePolicy::new(120, 600),
            reddit: CachePolicy::new(300, 600),
            fallback: CachePolicy::new(60, 120),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides.
    pub log_level: String,

    /// Human-readable or JSON lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_header_format() {
        assert_eq!(
            CachePolicy::new(30, 60).header_value(),
            "s-maxage=30, stale-while-revalidate=60"
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [cache.github]
            s_maxage = 90
            stale_while_revalidate = 300
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.cache.github, CachePolicy::new(90, 300));
        assert_eq!(config.cache.reddit, CachePolicy::new(300, 600));
        assert_eq!(config.timeouts.request_secs, 10);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn stale_window_defaults_to_twice_max_age() {
        let config: ServiceConfig = toml::from_str("[cache.github]\ns_maxage = 90").unwrap();
        assert_eq!(config.cache.github, CachePolicy::new(90, 180));
        assert_eq!(config.cache.price, CachePolicy::new(30, 60));
    }

    #[test]
    fn log_format_parses_lowercase() {
        let config: ObservabilityConfig = toml::from_str(r#"log_format = "json""#).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
