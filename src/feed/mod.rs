//! Best-effort feed extraction.
//!
//! Feeds are untrusted, loosely structured text and the consumer only shows
//! the most recent entry, so this is a tolerant single-entry scan rather
//! than a parser. Malformed markup degrades to [`NO_TITLE`], never an error.

pub mod extract;

pub use extract::{first_item, split_category};

/// Title used when a feed has no entries or the entry has no title.
pub const NO_TITLE: &str = "(no title)";

/// First entry of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: Option<String>,
}
