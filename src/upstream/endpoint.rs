//! Fully formed upstream request descriptions.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use url::Url;

/// A URL plus the headers to attach. Built by the integrations, executed
/// by [`UpstreamFetcher`](super::UpstreamFetcher).
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: Url,
    pub headers: HeaderMap,
}

impl Endpoint {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Attach a header. Fails when the value contains bytes HTTP forbids,
    /// which in practice means a pasted secret with a stray newline.
    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(value)?;
        if name == reqwest::header::AUTHORIZATION || name.as_str() == "x-api-key" {
            value.set_sensitive(true);
        }
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Host part of the URL, for logs and metrics labels.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("unknown")
    }
}

/// Join `segments` onto `base`, percent-encoding each one.
///
/// A base with a path prefix (`https://proxy.local/jup`) keeps it.
pub fn join_path<'a, I>(base: &str, segments: I) -> Result<Url, url::ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = Url::parse(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}
