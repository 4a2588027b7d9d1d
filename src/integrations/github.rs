//! GitHub latest-commit status line.

use reqwest::header::{HeaderName, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;

use crate::config::secrets::GithubRepo;
use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::integrations::{header_error, url_error, StatusLine};
use crate::upstream::{join_path, Endpoint};

pub const UPSTREAM: &str = "github";
pub const LABEL: &str = "github";

const SHORT_SHA_LEN: usize = 7;

#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: Option<String>,
    commit: Option<CommitDetail>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: Option<String>,
}

/// `GET <base>/repos/<owner>/<repo>/commits?per_page=1`
pub fn commits_endpoint(
    config: &UpstreamConfig,
    repo: &GithubRepo<'_>,
    token: Option<&str>,
) -> Result<Endpoint, ProxyError> {
    let mut url = join_path(
        &config.github_base_url,
        ["repos", repo.owner, repo.repo, "commits"],
    )
    .map_err(url_error)?;
    url.query_pairs_mut().append_pair("per_page", "1");

    let mut endpoint = with(Endpoint::new(url), USER_AGENT, &config.user_agent)?;
    endpoint = with(endpoint, ACCEPT, "application/vnd.github+json")?;
    if let Some(token) = token {
        endpoint = with(endpoint, AUTHORIZATION, &format!("Bearer {}", token))?;
    }
    Ok(endpoint)
}

fn with(endpoint: Endpoint, name: HeaderName, value: &str) -> Result<Endpoint, ProxyError> {
    let label = name.as_str().to_string();
    endpoint.header(name, value).map_err(|_| header_error(&label))
}

/// Turn a commit list into `github: owner/repo @ abcdef1 — first line`.
///
/// An empty list, or a head commit without sha or message, falls back to
/// `github: owner/repo (latest)`.
pub fn summarize(repo: &GithubRepo<'_>, body: &[u8]) -> Result<StatusLine, ProxyError> {
    let commits: Vec<CommitEntry> = serde_json::from_slice(body)
        .map_err(|e| ProxyError::TransportFailure(format!("unexpected commit list: {}", e)))?;

    let head = commits.into_iter().next();
    let sha = head
        .as_ref()
        .and_then(|c| c.sha.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let subject = head
        .as_ref()
        .and_then(|c| c.commit.as_ref())
        .and_then(|c| c.message.as_deref())
        .and_then(|m| m.lines().next())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let message = match (sha, subject) {
        (Some(sha), Some(subject)) => {
            let short: String = sha.chars().take(SHORT_SHA_LEN).collect();
            format!("{}: {} @ {} — {}", LABEL, repo, short, subject)
        }
        _ => format!("{}: {} (latest)", LABEL, repo),
    };

    Ok(StatusLine {
        message,
        link: None,
    })
}
