use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info};
use thiserror::Error;
use tokio::time::MissedTickBehavior;

use crate::base::repository::{FeedRepository, PostRepository};
use crate::data::error::StoreError;
use crate::models::Post;
use crate::services::dates::parse_pub_date;
use crate::services::fetcher::{FeedFetcher, FetchError};
use crate::utils::unescape_entities;

/// Errors from a single ingestion tick
#[derive(Debug, Error)]
pub enum IngestError {
    /// No feed is waiting to be fetched. This is the loop's clean
    /// termination signal, not an operational failure.
    #[error("no feed is eligible for fetching")]
    NoEligibleFeed,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// What a single tick accomplished
#[derive(Debug)]
pub struct TickReport {
    pub feed_name: String,
    /// Posts stored for the first time
    pub created: usize,
    /// Items skipped because the feed already had them
    pub skipped: usize,
}

/// Drives the fetch-and-store cycle: one feed per tick, oldest first.
pub struct IngestService {
    feeds: Arc<dyn FeedRepository>,
    posts: Arc<dyn PostRepository>,
    fetcher: FeedFetcher,
}

impl IngestService {
    pub fn new(
        feeds: Arc<dyn FeedRepository>,
        posts: Arc<dyn PostRepository>,
        fetcher: FeedFetcher,
    ) -> Self {
        Self {
            feeds,
            posts,
            fetcher,
        }
    }

    /// Runs one tick: claim the least-recently-fetched feed, fetch and
    /// parse it, and store its items.
    ///
    /// Duplicate items are skipped; any other failure aborts the tick.
    pub async fn scrape_once(&self) -> Result<TickReport, IngestError> {
        let feed = self
            .feeds
            .next_feed_to_fetch()?
            .ok_or(IngestError::NoEligibleFeed)?;

        // Claim the feed before fetching so the next tick moves on to
        // another feed even if this fetch fails. A feed whose fetch failed
        // is not retried until its turn comes around again.
        self.feeds.mark_feed_fetched(&feed.id, Utc::now())?;

        debug!("fetching feed {} ({})", feed.name, feed.url);
        let parsed = self.fetcher.fetch(&feed.url).await?;

        let mut report = TickReport {
            feed_name: feed.name.clone(),
            created: 0,
            skipped: 0,
        };

        for item in parsed.channel.items {
            let published_at = match parse_pub_date(&item.pub_date) {
                Ok(date) => Some(date),
                Err(err) => {
                    if !item.pub_date.is_empty() {
                        debug!("{err}, storing item without a publish date");
                    }
                    None
                }
            };

            let post = Post::new(
                feed.id.clone(),
                unescape_entities(&item.title),
                unescape_entities(&item.link),
                unescape_entities(&item.description),
                published_at,
            );

            match self.posts.create_post(&post) {
                Ok(()) => {
                    info!("stored post: {}", post.title);
                    report.created += 1;
                }
                Err(StoreError::Duplicate) => {
                    debug!("post already exists: {}", post.title);
                    report.skipped += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(report)
    }

    /// Runs ticks on a fixed interval until no feed is left to fetch or a
    /// tick fails.
    ///
    /// Ticks never overlap; a tick that outruns the interval delays the
    /// next one rather than skipping it.
    pub async fn run(&self, interval: Duration) -> Result<(), IngestError> {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.scrape_once().await {
                Ok(report) => info!(
                    "collected {}: {} new, {} already seen",
                    report.feed_name, report.created, report.skipped
                ),
                Err(IngestError::NoEligibleFeed) => {
                    info!("no feeds to fetch");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }
}
