//! Command-line surface: argument definitions and the command handlers.

pub mod commands;

use clap::{Parser, Subcommand};

pub use commands::App;

#[derive(Parser)]
#[command(name = "gator")]
#[command(version)]
#[command(about = "Command-line RSS aggregator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Switch the current user to an existing account
    Login {
        /// Name of the user to log in as
        name: String,
    },
    /// Create a new account and log in as it
    Register {
        /// Name for the new user
        name: String,
    },
    /// Delete every user, along with their feeds, follows, and posts
    Reset,
    /// List all registered users
    Users,
    /// List every feed known to the aggregator
    Feeds,
    /// Register a feed and start following it
    #[command(name = "addfeed")]
    AddFeed {
        /// Display name for the feed
        name: String,
        /// URL of the feed XML
        url: String,
    },
    /// Follow an existing feed by URL
    Follow {
        /// URL of the feed to follow
        url: String,
    },
    /// Stop following a feed
    Unfollow {
        /// URL of the feed to unfollow
        url: String,
    },
    /// List the feeds the current user follows
    Following,
    /// Show recent posts from followed feeds
    Browse {
        /// Maximum number of posts to show
        limit: Option<String>,
    },
    /// Run the ingestion loop, collecting one feed per interval
    Agg {
        /// Time between ticks, e.g. 30s or 1m
        interval: String,
    },
}
