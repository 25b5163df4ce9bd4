use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Row};

use crate::base::repository::PostRepository;
use crate::data::error::StoreResult;
use crate::models::{FeedId, Post, PostId, UserId};

/// SQLite-based post repository implementation
pub struct SqlitePostRepository {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl SqlitePostRepository {
    pub fn new(pool: Arc<Pool<SqliteConnectionManager>>) -> Self {
        Self { pool }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Post> {
        Ok(Post {
            id: PostId(row.get(0)?),
            feed_id: FeedId(row.get(1)?),
            title: row.get(2)?,
            url: row.get(3)?,
            description: row.get(4)?,
            published_at: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

impl PostRepository for SqlitePostRepository {
    fn create_post(&self, post: &Post) -> StoreResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO posts (id, feed_id, title, url, description, published_at,
                                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                post.id.0,
                post.feed_id.0,
                post.title,
                post.url,
                post.description,
                post.published_at,
                post.created_at,
                post.updated_at,
            ],
        )?;
        Ok(())
    }

    fn list_posts_for_user(&self, user_id: &UserId, limit: u32) -> StoreResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.feed_id, p.title, p.url, p.description, p.published_at,
                    p.created_at, p.updated_at
             FROM posts p
             JOIN feed_follows ff ON ff.feed_id = p.feed_id
             WHERE ff.user_id = ?1
             ORDER BY p.published_at DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![user_id.0, limit], Self::map_row)?;

        let mut posts = Vec::new();
        for post in rows {
            posts.push(post?);
        }
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use url::Url;

    use crate::base::repository::{FeedRepository, FollowRepository, UserRepository};
    use crate::data::database::test_pool;
    use crate::data::error::StoreError;
    use crate::data::repositories::{
        SqliteFeedRepository, SqliteFollowRepository, SqliteUserRepository,
    };
    use crate::models::{Feed, FeedFollow, User};

    struct Fixture {
        posts: SqlitePostRepository,
        follows: SqliteFollowRepository,
        alice: User,
        blog: Feed,
    }

    fn fixture() -> Fixture {
        let pool = test_pool();
        let users = SqliteUserRepository::new(pool.clone());
        let feeds = SqliteFeedRepository::new(pool.clone());
        let follows = SqliteFollowRepository::new(pool.clone());
        let posts = SqlitePostRepository::new(pool);

        let alice = User::new("alice");
        users.create_user(&alice).unwrap();
        let blog = Feed::new(
            alice.id.clone(),
            "blog",
            Url::parse("https://example.com/rss").unwrap(),
        );
        feeds.create_feed(&blog).unwrap();
        follows
            .create_follow(&FeedFollow::new(alice.id.clone(), blog.id.clone()))
            .unwrap();

        Fixture {
            posts,
            follows,
            alice,
            blog,
        }
    }

    #[test]
    fn test_same_url_in_same_feed_is_rejected() {
        let fx = fixture();

        let first = Post::new(
            fx.blog.id.clone(),
            "Hello",
            "https://example.com/hello",
            "first",
            Some(Utc::now()),
        );
        fx.posts.create_post(&first).unwrap();

        let again = Post::new(
            fx.blog.id.clone(),
            "Hello again",
            "https://example.com/hello",
            "second",
            None,
        );
        let err = fx.posts.create_post(&again).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));

        let stored = fx.posts.list_posts_for_user(&fx.alice.id, 10).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Hello");
    }

    #[test]
    fn test_listing_respects_limit_and_order() {
        let fx = fixture();

        for i in 0..5 {
            let post = Post::new(
                fx.blog.id.clone(),
                format!("post {i}"),
                format!("https://example.com/{i}"),
                "",
                Some(Utc::now() - Duration::hours(i)),
            );
            fx.posts.create_post(&post).unwrap();
        }

        let recent = fx.posts.list_posts_for_user(&fx.alice.id, 3).unwrap();
        assert_eq!(recent.len(), 3);
        // Newest publication first.
        assert_eq!(recent[0].title, "post 0");
        assert_eq!(recent[2].title, "post 2");
    }

    #[test]
    fn test_listing_only_covers_followed_feeds() {
        let fx = fixture();

        let post = Post::new(
            fx.blog.id.clone(),
            "Hello",
            "https://example.com/hello",
            "",
            None,
        );
        fx.posts.create_post(&post).unwrap();

        fx.follows.delete_follow(&fx.alice.id, &fx.blog.id).unwrap();
        assert!(fx
            .posts
            .list_posts_for_user(&fx.alice.id, 10)
            .unwrap()
            .is_empty());
    }
}
