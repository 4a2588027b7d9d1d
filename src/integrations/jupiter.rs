//! Jupiter price and holdings lookups.

use reqwest::header::HeaderName;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::integrations::{header_error, url_error};
use crate::upstream::{join_path, Endpoint};

pub const UPSTREAM: &str = "jupiter";

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// `GET <base>/price/v3?ids=<ids>`
pub fn price_endpoint(
    config: &UpstreamConfig,
    api_key: &str,
    ids: &str,
) -> Result<Endpoint, ProxyError> {
    let mut url = join_path(&config.jupiter_base_url, ["price", "v3"]).map_err(url_error)?;
    url.query_pairs_mut().append_pair("ids", ids);
    keyed(Endpoint::new(url), api_key)
}

/// `GET <base>/ultra/v1/holdings/<wallet>`
pub fn holdings_endpoint(config: &UpstreamConfig, api_key: &str) -> Result<Endpoint, ProxyError> {
    let url = join_path(
        &config.jupiter_base_url,
        ["ultra", "v1", "holdings", config.wallet_address.trim()],
    )
    .map_err(url_error)?;
    keyed(Endpoint::new(url), api_key)
}

fn keyed(endpoint: Endpoint, api_key: &str) -> Result<Endpoint, ProxyError> {
    endpoint
        .header(API_KEY_HEADER, api_key)
        .map_err(|_| header_error("x-api-key"))
}
