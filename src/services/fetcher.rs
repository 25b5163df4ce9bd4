use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// User agent sent with every feed request
pub const FEED_USER_AGENT: &str = "gator/1.0";

/// Errors from fetching or parsing a feed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed responded with status {0}")]
    Status(StatusCode),
    #[error("failed to parse feed XML: {0}")]
    Parse(#[from] quick_xml::DeError),
}

/// An RSS document, as fetched from a feed URL
#[derive(Debug, Clone, Deserialize)]
pub struct RssFeed {
    pub channel: RssChannel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RssChannel {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "item", default)]
    pub items: Vec<RssItem>,
}

/// A single channel item. `pub_date` stays a raw string so the date
/// normalizer decides what to make of it.
#[derive(Debug, Clone, Deserialize)]
pub struct RssItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
}

/// Downloads and parses RSS documents.
///
/// One attempt per call; retry policy belongs to the caller.
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    /// Builds a fetcher with the fixed gator user agent
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(FEED_USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Fetches the URL and parses the body as an RSS document.
    ///
    /// Any status above 299 is an error; the body is read first either way.
    pub async fn fetch(&self, url: &Url) -> Result<RssFeed, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() > 299 {
            return Err(FetchError::Status(status));
        }

        let feed = quick_xml::de::from_str(&body)?;
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Blog</title>
    <link>https://example.com/</link>
    <description>An example</description>
    <item>
      <title>First &amp; foremost</title>
      <link>https://example.com/1</link>
      <description>Opening post</description>
      <pubDate>Mon, 21 Oct 2024 07:28:00 GMT</pubDate>
    </item>
    <item>
      <title>Second</title>
      <link>https://example.com/2</link>
      <description>Another post</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parses_channel_and_items() {
        let feed: RssFeed = quick_xml::de::from_str(SAMPLE).unwrap();

        assert_eq!(feed.channel.title, "Example Blog");
        assert_eq!(feed.channel.items.len(), 2);
        assert_eq!(feed.channel.items[0].title, "First & foremost");
        assert_eq!(
            feed.channel.items[0].pub_date,
            "Mon, 21 Oct 2024 07:28:00 GMT"
        );
        // Missing pubDate falls back to an empty string.
        assert_eq!(feed.channel.items[1].pub_date, "");
    }

    #[test]
    fn test_channel_without_items() {
        let doc = r#"<rss><channel><title>Empty</title><link>x</link>
            <description>d</description></channel></rss>"#;
        let feed: RssFeed = quick_xml::de::from_str(doc).unwrap();
        assert!(feed.channel.items.is_empty());
    }

    #[test]
    fn test_non_rss_document_is_rejected() {
        assert!(quick_xml::de::from_str::<RssFeed>("this is not xml").is_err());
    }
}
