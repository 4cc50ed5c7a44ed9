//! Minimal RSS 2.0 model shared by the feed-based sources.
//!
//! Only the elements the boards actually populate are mapped; anything else in
//! the feed is ignored. The deserializer matches elements by local name, so
//! `job_listing:company` is mapped as `company`.

use chrono::DateTime;
use serde::Deserialize;

use crate::http::FetchError;
use crate::models::listing::iso_date_prefix;

#[derive(Debug, Deserialize)]
struct Feed {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
    #[serde(default)]
    pub region: String,
    #[serde(rename = "category", default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
}

pub fn parse_feed(xml: &str) -> Result<Vec<FeedItem>, FetchError> {
    let feed: Feed = quick_xml::de::from_str(xml)?;
    Ok(feed.channel.items)
}

/// `pubDate` is RFC 2822; fall back to the leading ten characters otherwise.
pub fn pub_date_to_iso(raw: &str) -> String {
    DateTime::parse_from_rfc2822(raw.trim())
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| iso_date_prefix(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feed_reads_items_and_ignores_unknown_elements() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:job_listing="https://jobicy.com">
  <channel>
    <title>Feed</title>
    <link>https://example.com</link>
    <item>
      <title><![CDATA[Senior Java Engineer]]></title>
      <link>https://example.com/jobs/1</link>
      <guid isPermaLink="false">1</guid>
      <pubDate>Fri, 16 Oct 2026 08:00:00 +0000</pubDate>
      <category>Programming</category>
      <category>Java</category>
      <job_listing:company>Acme</job_listing:company>
    </item>
    <item>
      <title>Second</title>
      <link>https://example.com/jobs/2</link>
    </item>
  </channel>
</rss>"#;

        let items = parse_feed(xml).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Senior Java Engineer");
        assert_eq!(items[0].categories, vec!["Programming", "Java"]);
        assert_eq!(items[0].company, "Acme");
        assert!(items[1].company.is_empty());
    }

    #[test]
    fn test_pub_date_to_iso() {
        assert_eq!(pub_date_to_iso("Fri, 16 Oct 2026 08:00:00 +0000"), "2026-10-16");
        assert_eq!(pub_date_to_iso("2026-10-16T08:00:00Z"), "2026-10-16");
        assert_eq!(pub_date_to_iso(""), "");
    }
}
