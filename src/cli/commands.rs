use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use url::Url;

use crate::base::repository::{FeedRepository, FollowRepository, PostRepository, UserRepository};
use crate::cli::Command;
use crate::config::Config;
use crate::data::{Database, StoreError};
use crate::models::{Feed, FeedFollow, User};
use crate::services::fetcher::FeedFetcher;
use crate::services::ingest::IngestService;
use crate::utils::{parse_interval, truncate};

const DEFAULT_BROWSE_LIMIT: u32 = 2;

/// Wires the config and repositories together and executes commands.
///
/// Commands that need a login resolve the current user once and receive it
/// as an explicit parameter.
pub struct App {
    config: Config,
    users: Arc<dyn UserRepository>,
    feeds: Arc<dyn FeedRepository>,
    follows: Arc<dyn FollowRepository>,
    posts: Arc<dyn PostRepository>,
}

impl App {
    pub fn new(config: Config, database: &Database) -> Self {
        Self {
            config,
            users: database.user_repository(),
            feeds: database.feed_repository(),
            follows: database.follow_repository(),
            posts: database.post_repository(),
        }
    }

    pub async fn run(mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { name } => self.login(&name),
            Command::Register { name } => self.register(&name),
            Command::Reset => self.reset(),
            Command::Users => self.users(),
            Command::Feeds => self.feeds(),
            Command::AddFeed { name, url } => {
                let user = self.current_user()?;
                self.add_feed(&user, &name, &url)
            }
            Command::Follow { url } => {
                let user = self.current_user()?;
                self.follow(&user, &url)
            }
            Command::Unfollow { url } => {
                let user = self.current_user()?;
                self.unfollow(&user, &url)
            }
            Command::Following => {
                let user = self.current_user()?;
                self.following(&user)
            }
            Command::Browse { limit } => {
                let user = self.current_user()?;
                self.browse(&user, limit.as_deref())
            }
            Command::Agg { interval } => self.aggregate(&interval).await,
        }
    }

    /// Resolves the logged-in user recorded in the config
    fn current_user(&self) -> Result<User> {
        let name = self
            .config
            .current_user_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                anyhow!("you must be logged in. Use: gator login <name> or gator register <name>")
            })?;

        self.users
            .find_user_by_name(name)?
            .ok_or_else(|| anyhow!("current user {name:?} no longer exists; log in again"))
    }

    fn login(&mut self, name: &str) -> Result<()> {
        let user = self
            .users
            .find_user_by_name(name)?
            .ok_or_else(|| anyhow!("user {name:?} not found. Double-check the name and try again"))?;

        self.config.set_user(&user.name)?;
        println!("Current user has been set to: {}", user.name);
        Ok(())
    }

    fn register(&mut self, name: &str) -> Result<()> {
        let user = User::new(name);
        match self.users.create_user(&user) {
            Ok(()) => {}
            Err(StoreError::Duplicate) => {
                bail!("user {name:?} already exists. Please pick a different name")
            }
            Err(err) => return Err(err).context("failed to register user"),
        }

        self.config.set_user(name)?;
        println!("New user registered: {name}");
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        self.users
            .delete_all_users()
            .context("failed to reset the database")?;
        println!("Database has been reset");
        Ok(())
    }

    fn users(&self) -> Result<()> {
        let current = self.config.current_user_name.as_deref();
        for user in self.users.list_users()? {
            if current == Some(user.name.as_str()) {
                println!("* {} (current)", user.name);
            } else {
                println!("* {}", user.name);
            }
        }
        Ok(())
    }

    fn feeds(&self) -> Result<()> {
        let feeds = self.feeds.list_feeds()?;
        if feeds.is_empty() {
            println!("No feeds registered yet");
            return Ok(());
        }

        for entry in feeds {
            println!(
                "* {} ({}) added by {}",
                entry.feed.name, entry.feed.url, entry.owner_name
            );
        }
        Ok(())
    }

    fn add_feed(&self, user: &User, name: &str, url: &str) -> Result<()> {
        let url = Url::parse(url).with_context(|| format!("invalid feed URL {url:?}"))?;

        let feed = Feed::new(user.id.clone(), name, url);
        match self.feeds.create_feed(&feed) {
            Ok(()) => {}
            Err(StoreError::Duplicate) => {
                bail!("a feed with URL {} is already registered", feed.url)
            }
            Err(err) => return Err(err).context("failed to create feed"),
        }

        println!("Feed successfully added");
        println!("- Name: {}", feed.name);
        println!("- URL:  {}", feed.url);

        self.follows
            .create_follow(&FeedFollow::new(user.id.clone(), feed.id.clone()))
            .context("failed to follow the new feed")?;
        println!("Now following: {}", feed.name);
        Ok(())
    }

    fn follow(&self, user: &User, url: &str) -> Result<()> {
        let feed = self
            .feeds
            .find_feed_by_url(url)?
            .ok_or_else(|| anyhow!("no feed registered with URL {url:?}"))?;

        match self
            .follows
            .create_follow(&FeedFollow::new(user.id.clone(), feed.id.clone()))
        {
            Ok(()) => {}
            Err(StoreError::Duplicate) => bail!("already following {}", feed.name),
            Err(err) => return Err(err).context("failed to follow the feed"),
        }

        println!("Now following: {}", feed.name);
        Ok(())
    }

    fn unfollow(&self, user: &User, url: &str) -> Result<()> {
        let feed = self
            .feeds
            .find_feed_by_url(url)?
            .ok_or_else(|| anyhow!("no feed registered with URL {url:?}"))?;

        self.follows
            .delete_follow(&user.id, &feed.id)
            .context("failed to unfollow the feed")?;
        println!("Unfollowed: {}", feed.name);
        Ok(())
    }

    fn following(&self, user: &User) -> Result<()> {
        let feeds = self.follows.list_followed_feeds(&user.id)?;
        let plural = if feeds.len() == 1 { "feed" } else { "feeds" };
        println!("Following {} {plural}", feeds.len());
        for feed in feeds {
            println!("* {}", feed.name);
        }
        Ok(())
    }

    fn browse(&self, user: &User, limit: Option<&str>) -> Result<()> {
        let limit = match limit {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                eprintln!("ignoring invalid limit {raw:?}, using {DEFAULT_BROWSE_LIMIT}");
                DEFAULT_BROWSE_LIMIT
            }),
            None => DEFAULT_BROWSE_LIMIT,
        };

        let posts = self.posts.list_posts_for_user(&user.id, limit)?;
        if posts.is_empty() {
            println!("No posts found");
            return Ok(());
        }

        for post in posts {
            let published = post
                .published_at
                .map(|date| date.format("%d %B %Y %H:%M").to_string())
                .unwrap_or_else(|| "N/A".to_owned());

            println!("* {} ({published})", truncate(&post.title, 70));
            println!("  {}", post.url);
            if !post.description.is_empty() {
                println!("  {}", truncate(&post.description, 100));
            }
        }
        Ok(())
    }

    async fn aggregate(&self, interval: &str) -> Result<()> {
        let interval = parse_interval(interval)?;
        println!("Collecting feeds every {interval:?}");

        let fetcher = FeedFetcher::new()?;
        let ingest = IngestService::new(self.feeds.clone(), self.posts.clone(), fetcher);

        tokio::select! {
            result = ingest.run(interval) => result.context("error while collecting feeds"),
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, shutting down");
                Ok(())
            }
        }
    }
}
