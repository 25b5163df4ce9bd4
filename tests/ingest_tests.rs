use chrono::{Duration, TimeZone, Utc};
use tempfile::NamedTempFile;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gator::data::Database;
use gator::models::{Feed, FeedFollow, User};
use gator::services::fetcher::{FeedFetcher, FetchError};
use gator::services::ingest::{IngestError, IngestService};

const TWO_ITEM_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Blog</title>
    <link>https://example.com/</link>
    <description>A blog</description>
    <item>
      <title>Dated &amp; ready</title>
      <link>https://example.com/dated</link>
      <description>Has a date</description>
      <pubDate>Mon, 21 Oct 2024 07:28:00 GMT</pubDate>
    </item>
    <item>
      <title>Undated</title>
      <link>https://example.com/undated</link>
      <description>Has no parseable date</description>
      <pubDate>whenever I felt like it</pubDate>
    </item>
  </channel>
</rss>"#;

fn single_item_rss(name: &str) -> String {
    format!(
        r#"<rss version="2.0"><channel>
        <title>{name}</title><link>x</link><description>d</description>
        <item>
          <title>{name} post</title>
          <link>https://example.com/{name}</link>
          <description>body</description>
          <pubDate>Mon, 21 Oct 2024 07:28:00 GMT</pubDate>
        </item>
        </channel></rss>"#
    )
}

struct Harness {
    // Held so the database file outlives the test.
    _db_file: NamedTempFile,
    database: Database,
    server: MockServer,
    alice: User,
}

async fn harness() -> Harness {
    let db_file = NamedTempFile::new().unwrap();
    let database = Database::open(db_file.path()).unwrap();
    let server = MockServer::start().await;

    let alice = User::new("alice");
    database.user_repository().create_user(&alice).unwrap();

    Harness {
        _db_file: db_file,
        database,
        server,
        alice,
    }
}

impl Harness {
    /// Registers a feed pointing at the given mock path and follows it as
    /// alice
    fn add_feed(&self, name: &str, mock_path: &str) -> Feed {
        let url = Url::parse(&format!("{}{}", self.server.uri(), mock_path)).unwrap();
        let feed = Feed::new(self.alice.id.clone(), name, url);
        self.database.feed_repository().create_feed(&feed).unwrap();
        self.database
            .follow_repository()
            .create_follow(&FeedFollow::new(self.alice.id.clone(), feed.id.clone()))
            .unwrap();
        feed
    }

    fn ingest(&self) -> IngestService {
        IngestService::new(
            self.database.feed_repository(),
            self.database.post_repository(),
            FeedFetcher::new().unwrap(),
        )
    }
}

#[tokio::test]
async fn tick_stores_items_and_tolerates_unparseable_dates() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TWO_ITEM_RSS))
        .mount(&h.server)
        .await;
    h.add_feed("blog", "/feed");

    let report = h.ingest().scrape_once().await.unwrap();
    assert_eq!(report.feed_name, "blog");
    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 0);

    let posts = h
        .database
        .post_repository()
        .list_posts_for_user(&h.alice.id, 10)
        .unwrap();
    assert_eq!(posts.len(), 2);

    let dated = posts.iter().find(|p| p.title == "Dated & ready").unwrap();
    assert_eq!(
        dated.published_at.unwrap(),
        Utc.with_ymd_and_hms(2024, 10, 21, 7, 28, 0).unwrap()
    );

    let undated = posts.iter().find(|p| p.title == "Undated").unwrap();
    assert!(undated.published_at.is_none());
}

#[tokio::test]
async fn reingesting_the_same_content_is_idempotent() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TWO_ITEM_RSS))
        .mount(&h.server)
        .await;
    h.add_feed("blog", "/feed");

    let ingest = h.ingest();
    ingest.scrape_once().await.unwrap();

    // The same feed is eligible again because it is still the oldest.
    let second = ingest.scrape_once().await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 2);

    let posts = h
        .database
        .post_repository()
        .list_posts_for_user(&h.alice.id, 10)
        .unwrap();
    assert_eq!(posts.len(), 2);
}

#[tokio::test]
async fn ticks_visit_feeds_oldest_first() {
    let h = harness().await;

    for name in ["never", "old", "recent"] {
        Mock::given(method("GET"))
            .and(path(format!("/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(single_item_rss(name)))
            .mount(&h.server)
            .await;
    }

    // "never" keeps a null last_fetched_at; the others get backdated stamps.
    h.add_feed("never", "/never");
    let old = h.add_feed("old", "/old");
    let recent = h.add_feed("recent", "/recent");

    let feeds = h.database.feed_repository();
    feeds
        .mark_feed_fetched(&old.id, Utc::now() - Duration::hours(2))
        .unwrap();
    feeds
        .mark_feed_fetched(&recent.id, Utc::now() - Duration::hours(1))
        .unwrap();

    let ingest = h.ingest();
    let mut visited = Vec::new();
    for _ in 0..3 {
        visited.push(ingest.scrape_once().await.unwrap().feed_name);
    }
    assert_eq!(visited, vec!["never", "old", "recent"]);
}

#[tokio::test]
async fn no_feeds_terminates_with_the_no_eligible_feed_signal() {
    let h = harness().await;

    let err = h.ingest().scrape_once().await.unwrap_err();
    assert!(matches!(err, IngestError::NoEligibleFeed));
}

#[tokio::test]
async fn failed_fetch_still_claims_the_feed() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;
    let feed = h.add_feed("broken", "/feed");

    let err = h.ingest().scrape_once().await.unwrap_err();
    assert!(matches!(err, IngestError::Fetch(FetchError::Status(_))));

    // The claim happened before the fetch, so the feed no longer counts as
    // never-fetched.
    let stored = h
        .database
        .feed_repository()
        .find_feed_by_url(feed.url.as_str())
        .unwrap()
        .unwrap();
    assert!(stored.last_fetched_at.is_some());
}

#[tokio::test]
async fn successful_tick_advances_the_fetch_timestamp() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TWO_ITEM_RSS))
        .mount(&h.server)
        .await;
    let feed = h.add_feed("blog", "/feed");

    let before = Utc::now() - Duration::minutes(30);
    let feeds = h.database.feed_repository();
    feeds.mark_feed_fetched(&feed.id, before).unwrap();

    h.ingest().scrape_once().await.unwrap();

    let after = feeds
        .find_feed_by_url(feed.url.as_str())
        .unwrap()
        .unwrap()
        .last_fetched_at
        .unwrap();
    assert!(after > before);
}
