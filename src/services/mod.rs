pub mod dates;
pub mod fetcher;
pub mod ingest;

pub use dates::{parse_pub_date, DateParseError};
pub use fetcher::{FeedFetcher, FetchError, RssChannel, RssFeed, RssItem, FEED_USER_AGENT};
pub use ingest::{IngestError, IngestService, TickReport};
