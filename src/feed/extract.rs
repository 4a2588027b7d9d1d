//! Tag-scoped pattern extraction over raw feed markup.

use std::sync::LazyLock;

use regex::Regex;

use crate::feed::{FeedItem, NO_TITLE};

static ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<item\b[^>]*>(.*?)</item\s*>").expect("valid regex"));
static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<entry\b[^>]*>(.*?)</entry\s*>").expect("valid regex"));
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>(.*?)</link\s*>").expect("valid regex"));
static LINK_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<link\b[^>]*?\bhref\s*=\s*["']([^"']*)["']"#).expect("valid regex")
});
static CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*(r/[A-Za-z0-9_]+)\s*\)\s*$").expect("valid regex"));

/// Pull title and link from the first entry of a feed.
///
/// RSS `<item>` is tried first, then Atom `<entry>`. Never fails: a feed
/// with no entries, or an entry with no title, yields [`NO_TITLE`].
pub fn first_item(markup: &str) -> FeedItem {
    let Some(block) = first_block(markup) else {
        return FeedItem {
            title: NO_TITLE.to_string(),
            link: None,
        };
    };

    let title = capture(&TITLE, block)
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let link = capture(&LINK, block)
        .map(clean_text)
        .filter(|l| !l.is_empty())
        .or_else(|| capture(&LINK_HREF, block).map(clean_text))
        .filter(|l| !l.is_empty());

    FeedItem { title, link }
}

fn first_block(markup: &str) -> Option<&str> {
    capture(&ITEM, markup).or_else(|| capture(&ENTRY, markup))
}

fn capture<'a>(re: &Regex, haystack: &'a str) -> Option<&'a str> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Strip CDATA markers, or decode basic entities when there are none.
fn clean_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains("<![CDATA[") {
        trimmed
            .replace("<![CDATA[", "")
            .replace("]]>", "")
            .trim()
            .to_string()
    } else {
        decode_entities(trimmed)
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Split a trailing `(r/<sub>)` tag off a title.
///
/// Returns the title with the tag removed and the tag itself, e.g.
/// `"Post Title (r/test)"` → `("Post Title", Some("r/test"))`. A tag that
/// does not end the title stays where it is. A title that is nothing but
/// the tag comes back empty.
pub fn split_category(title: &str) -> (String, Option<String>) {
    let Some(caps) = CATEGORY.captures(title) else {
        return (title.to_string(), None);
    };
    let (Some(whole), Some(category)) = (caps.get(0), caps.get(1)) else {
        return (title.to_string(), None);
    };

    let cleaned = title[..whole.start()]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (cleaned, Some(category.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdata_title_and_plain_link() {
        let xml = "<rss><channel><title>feed</title>\
                   <item><title><![CDATA[Post Title (r/test)]]></title>\
                   <link>https://x</link></item></channel></rss>";
        assert_eq!(
            first_item(xml),
            FeedItem {
                title: "Post Title (r/test)".into(),
                link: Some("https://x".into()),
            }
        );
    }

    #[test]
    fn channel_title_is_not_mistaken_for_item_title() {
        let xml = "<channel><title>Overview for matty</title><link>https://chan</link>\
                   <item><title>First</title><link>https://first</link></item>\
                   <item><title>Second</title></item></channel>";
        let item = first_item(xml);
        assert_eq!(item.title, "First");
        assert_eq!(item.link.as_deref(), Some("https://first"));
    }

    #[test]
    fn no_items_falls_back() {
        let item = first_item("<rss><channel><title>empty</title></channel></rss>");
        assert_eq!(item.title, NO_TITLE);
        assert_eq!(item.link, None);
    }

    #[test]
    fn item_without_title_falls_back() {
        let item = first_item("<item><link>https://x</link></item>");
        assert_eq!(item.title, NO_TITLE);
        assert_eq!(item.link.as_deref(), Some("https://x"));
    }

    #[test]
    fn entities_are_decoded_outside_cdata() {
        let item = first_item("<item>\n  <title>Rust &amp; &lt;Tokio&gt;</title>\n</item>");
        assert_eq!(item.title, "Rust & <Tokio>");
    }

    #[test]
    fn atom_entry_with_href_link() {
        let xml = r#"<feed><title>matty</title>
            <entry><title>Atom post (r/rust)</title>
            <link href="https://www.reddit.com/r/rust/comments/1?a=1&amp;b=2" /></entry></feed>"#;
        let item = first_item(xml);
        assert_eq!(item.title, "Atom post (r/rust)");
        assert_eq!(
            item.link.as_deref(),
            Some("https://www.reddit.com/r/rust/comments/1?a=1&b=2")
        );
    }

    #[test]
    fn split_trailing_category() {
        assert_eq!(
            split_category("Post Title (r/test)"),
            ("Post Title".to_string(), Some("r/test".to_string()))
        );
    }

    #[test]
    fn split_without_category() {
        assert_eq!(split_category("Just words (not a sub)"), ("Just words (not a sub)".to_string(), None));
    }

    #[test]
    fn split_category_only_title() {
        assert_eq!(
            split_category("  (r/test) "),
            (String::new(), Some("r/test".to_string()))
        );
    }

    #[test]
    fn tag_in_the_middle_stays_in_title() {
        assert_eq!(
            split_category("Why I left (r/rust) for good"),
            ("Why I left (r/rust) for good".to_string(), None)
        );
    }

    #[test]
    fn last_of_two_tags_is_the_category() {
        assert_eq!(
            split_category("Compare (r/rust) vs Go (r/golang)"),
            ("Compare (r/rust) vs Go".to_string(), Some("r/golang".to_string()))
        );
    }
}
