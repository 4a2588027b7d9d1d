//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check upstream base URLs parse and use http(s)
//! - Validate value ranges (timeouts > 0, cache lifetimes > 0)
//! - Check listener and metrics addresses are socket addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{CachePolicy, ServiceConfig};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `upstreams.github_base_url`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    let upstreams = &config.upstreams;
    for (field, value) in [
        ("upstreams.jupiter_base_url", &upstreams.jupiter_base_url),
        ("upstreams.github_base_url", &upstreams.github_base_url),
        ("upstreams.reddit_base_url", &upstreams.reddit_base_url),
    ] {
        check_base_url(field, value, &mut errors);
    }

    if upstreams.wallet_address.trim().is_empty() {
        errors.push(ValidationError::new("upstreams.wallet_address", "must not be empty"));
    }
    if upstreams.user_agent.trim().is_empty() {
        errors.push(ValidationError::new("upstreams.user_agent", "must not be empty"));
    }

    let cache = &config.cache;
    for (field, policy) in [
        ("cache.price", &cache.price),
        ("cache.positions", &cache.positions),
        ("cache.github", &cache.github),
        ("cache.reddit", &cache.reddit),
        ("cache.fallback", &cache.fallback),
    ] {
        check_cache_policy(field, policy, &mut errors);
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_base_url(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}

fn check_cache_policy(field: &str, policy: &CachePolicy, errors: &mut Vec<ValidationError>) {
    if policy.s_maxage == 0 {
        errors.push(ValidationError::new(
            format!("{}.s_maxage", field),
            "must be greater than 0",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.upstreams.github_base_url = "ftp://example.com".into();
        config.upstreams.reddit_base_url = "not a url".into();
        config.cache.fallback = CachePolicy::new(0, 10);

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "timeouts.request_secs",
                "upstreams.github_base_url",
                "upstreams.reddit_base_url",
                "cache.fallback.s_maxage",
            ]
        );
    }

    #[test]
    fn metrics_address_only_checked_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }
}
