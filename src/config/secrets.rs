//! Secrets and identifiers resolved from the process environment.
//!
//! Resolved once at startup and injected into handler state. A missing
//! value is not a startup error: each handler turns it into
//! [`ProxyError::Unconfigured`](crate::error::ProxyError::Unconfigured)
//! and its integration policy decides what the browser sees.

use std::fmt;

pub const JUPITER_API_KEY: &str = "JUPITER_API_KEY";
pub const GITHUB_OWNER: &str = "GITHUB_OWNER";
pub const GITHUB_REPO: &str = "GITHUB_REPO";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const REDDIT_USERNAME: &str = "REDDIT_USERNAME";

/// Environment-provided values. Blank values count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    pub jupiter_api_key: Option<String>,
    pub github_owner: Option<String>,
    pub github_repo: Option<String>,
    pub github_token: Option<String>,
    pub reddit_username: Option<String>,
}

/// Owner/repo pair for the build-status feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepo<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
}

impl fmt::Display for GithubRepo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl Secrets {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            jupiter_api_key: get(JUPITER_API_KEY),
            github_owner: get(GITHUB_OWNER),
            github_repo: get(GITHUB_REPO),
            github_token: get(GITHUB_TOKEN),
            reddit_username: get(REDDIT_USERNAME),
        }
    }

    /// The owner/repo pair, only when both halves are set.
    pub fn github_repo(&self) -> Option<GithubRepo<'_>> {
        match (&self.github_owner, &self.github_repo) {
            (Some(owner), Some(repo)) => Some(GithubRepo { owner, repo }),
            _ => None,
        }
    }

    /// Names of the integrations that have what they need, for the startup log.
    pub fn configured(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.jupiter_api_key.is_some() {
            names.push("jupiter");
        }
        if self.github_repo().is_some() {
            names.push("github");
        }
        if self.reddit_username.is_some() {
            names.push("reddit");
        }
        names
    }
}

// Keeps keys and tokens out of logs.
impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Secrets")
            .field("jupiter_api_key", &redact(&self.jupiter_api_key))
            .field("github_owner", &self.github_owner)
            .field("github_repo", &self.github_repo)
            .field("github_token", &redact(&self.github_token))
            .field("reddit_username", &self.reddit_username)
            .finish()
    }
}
