//! Reddit most-recent-submission status line.

use reqwest::header::USER_AGENT;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::feed::{first_item, split_category};
use crate::integrations::{header_error, url_error, StatusLine};
use crate::upstream::{join_path, Endpoint};

pub const UPSTREAM: &str = "reddit";
pub const LABEL: &str = "reddit";

/// `GET <base>/user/<username>/submitted.rss`
pub fn feed_endpoint(config: &UpstreamConfig, username: &str) -> Result<Endpoint, ProxyError> {
    let url = join_path(
        &config.reddit_base_url,
        ["user", username, "submitted.rss"],
    )
    .map_err(url_error)?;
    Endpoint::new(url)
        .header(USER_AGENT, &config.user_agent)
        .map_err(|_| header_error("user-agent"))
}

/// Turn raw feed markup into `reddit: last post in r/<sub> — <title>`.
pub fn summarize(body: &[u8]) -> StatusLine {
    let markup = String::from_utf8_lossy(body);
    let item = first_item(&markup);
    let (title, category) = split_category(&item.title);

    let message = match category {
        Some(category) if title.is_empty() => format!("{}: last post in {}", LABEL, category),
        Some(category) => format!("{}: last post in {} — {}", LABEL, category, title),
        None => format!("{}: {}", LABEL, title),
    };

    StatusLine {
        message,
        link: item.link,
    }
}
