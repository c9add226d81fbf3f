//! SQLite-backed interaction store.

use super::{
    round_one_decimal, validate_score, Comment, CommentAuthor, FavoriteSummary, ItemRef,
    LikeSummary, Rating, RatingSummary,
};
use crate::accounts::PublicUser;
use crate::error::{Result, WorldiaError};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Fixed-width UTC timestamp so text ordering matches time ordering.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Interaction store.
///
/// Thread-safe via an internal mutex on the connection.
#[derive(Clone)]
pub struct InteractionStore {
    conn: Arc<Mutex<Connection>>,
}

impl InteractionStore {
    /// Open (or create) the database at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WorldiaError::Io {
                message: format!("Failed to create data directory: {}", e),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })?;
        }

        let conn = Connection::open(db_path).map_err(|e| WorldiaError::Database {
            message: format!("Failed to open interactions database: {}", e),
            source: Some(e),
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| WorldiaError::Database {
                message: format!("Failed to set pragmas: {}", e),
                source: Some(e),
            })?;

        Self::from_connection(conn)
    }

    /// In-memory store, used by tests and ephemeral servers.
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| WorldiaError::Database {
            message: format!("Failed to lock database: {}", e),
            source: None,
        })
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS likes (
                user_id TEXT NOT NULL,
                item_id TEXT NOT NULL,
                item_type TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, item_id, item_type)
            );

            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL,
                item_id TEXT NOT NULL,
                item_type TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, item_id, item_type)
            );

            CREATE TABLE IF NOT EXISTS ratings (
                user_id TEXT NOT NULL,
                item_id TEXT NOT NULL,
                item_type TEXT NOT NULL,
                score INTEGER NOT NULL CHECK (score BETWEEN 1 AND 5),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (user_id, item_id, item_type)
            );

            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                user_name TEXT NOT NULL,
                item_id TEXT NOT NULL,
                item_type TEXT NOT NULL,
                content TEXT NOT NULL,
                rating INTEGER,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS shares (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id TEXT NOT NULL,
                item_type TEXT NOT NULL,
                platform TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_likes_item ON likes(item_id, item_type);
            CREATE INDEX IF NOT EXISTS idx_favorites_item ON favorites(item_id, item_type);
            CREATE INDEX IF NOT EXISTS idx_ratings_item ON ratings(item_id, item_type);
            CREATE INDEX IF NOT EXISTS idx_comments_item ON comments(item_id, item_type);
            CREATE INDEX IF NOT EXISTS idx_shares_item ON shares(item_id, item_type);
            "#,
        )?;

        Ok(())
    }

    /// Flip a membership row in `table`; returns whether it now exists.
    fn toggle(&self, table: &str, user_id: &str, item: &ItemRef) -> Result<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(
            &format!(
                "DELETE FROM {} WHERE user_id = ?1 AND item_id = ?2 AND item_type = ?3",
                table
            ),
            params![user_id, item.item_id, item.item_type],
        )?;
        if removed > 0 {
            debug!("Removed {} row for {}/{}", table, item.item_type, item.item_id);
            return Ok(false);
        }

        conn.execute(
            &format!(
                "INSERT INTO {} (user_id, item_id, item_type, created_at) VALUES (?1, ?2, ?3, ?4)",
                table
            ),
            params![user_id, item.item_id, item.item_type, timestamp()],
        )?;
        debug!("Added {} row for {}/{}", table, item.item_type, item.item_id);
        Ok(true)
    }

    /// Row count for the item and whether `user_id` has a row.
    fn membership(&self, table: &str, item: &ItemRef, user_id: Option<&str>) -> Result<(u64, bool)> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE item_id = ?1 AND item_type = ?2",
                table
            ),
            params![item.item_id, item.item_type],
            |row| row.get(0),
        )?;

        let member = match user_id {
            Some(user_id) => conn
                .query_row(
                    &format!(
                        "SELECT 1 FROM {} WHERE user_id = ?1 AND item_id = ?2 AND item_type = ?3",
                        table
                    ),
                    params![user_id, item.item_id, item.item_type],
                    |_| Ok(()),
                )
                .optional()?
                .is_some(),
            None => false,
        };

        Ok((count.max(0) as u64, member))
    }

    /// Like or unlike; returns whether the item is now liked.
    pub fn toggle_like(&self, user_id: &str, item: &ItemRef) -> Result<bool> {
        self.toggle("likes", user_id, item)
    }

    pub fn like_summary(&self, item: &ItemRef, user_id: Option<&str>) -> Result<LikeSummary> {
        let (count, is_liked) = self.membership("likes", item, user_id)?;
        Ok(LikeSummary { count, is_liked })
    }

    /// Favorite or unfavorite; returns whether the item is now a favorite.
    pub fn toggle_favorite(&self, user_id: &str, item: &ItemRef) -> Result<bool> {
        self.toggle("favorites", user_id, item)
    }

    pub fn favorite_summary(&self, item: &ItemRef, user_id: Option<&str>) -> Result<FavoriteSummary> {
        let (count, is_favorited) = self.membership("favorites", item, user_id)?;
        Ok(FavoriteSummary {
            count,
            is_favorited,
        })
    }

    /// Create or replace the user's rating of an item.
    pub fn rate(&self, user_id: &str, item: &ItemRef, score: i64) -> Result<Rating> {
        let score = validate_score(score)?;
        let now = timestamp();
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO ratings (user_id, item_id, item_type, score, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ON CONFLICT(user_id, item_id, item_type)
            DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at
            "#,
            params![user_id, item.item_id, item.item_type, score, now],
        )?;

        let rating = conn.query_row(
            "SELECT score, created_at, updated_at FROM ratings
             WHERE user_id = ?1 AND item_id = ?2 AND item_type = ?3",
            params![user_id, item.item_id, item.item_type],
            |row| {
                Ok(Rating {
                    user_id: user_id.to_string(),
                    item_id: item.item_id.clone(),
                    item_type: item.item_type.clone(),
                    score: row.get(0)?,
                    created_at: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            },
        )?;

        Ok(rating)
    }

    pub fn rating_summary(&self, item: &ItemRef, user_id: Option<&str>) -> Result<RatingSummary> {
        let conn = self.lock()?;
        let (average, total): (Option<f64>, i64) = conn.query_row(
            "SELECT AVG(score), COUNT(*) FROM ratings WHERE item_id = ?1 AND item_type = ?2",
            params![item.item_id, item.item_type],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let user_rating = match user_id {
            Some(user_id) => conn
                .query_row(
                    "SELECT score FROM ratings WHERE user_id = ?1 AND item_id = ?2 AND item_type = ?3",
                    params![user_id, item.item_id, item.item_type],
                    |row| row.get::<_, u8>(0),
                )
                .optional()?,
            None => None,
        };

        Ok(RatingSummary {
            average_rating: round_one_decimal(average.unwrap_or(0.0)),
            total_ratings: total.max(0) as u64,
            user_rating,
        })
    }

    /// Post a comment with an optional 1..=5 rating.
    pub fn add_comment(
        &self,
        user: &PublicUser,
        item: &ItemRef,
        content: &str,
        rating: Option<i64>,
    ) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(WorldiaError::validation(
                "content",
                "itemId, itemType, and content are required",
            ));
        }
        let rating = rating.map(validate_score).transpose()?;
        let created_at = timestamp();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO comments (user_id, user_name, item_id, item_type, content, rating, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.id,
                user.name,
                item.item_id,
                item.item_type,
                content,
                rating,
                created_at
            ],
        )?;

        Ok(Comment {
            id: conn.last_insert_rowid(),
            item_id: item.item_id.clone(),
            item_type: item.item_type.clone(),
            content: content.to_string(),
            rating,
            created_at,
            user: CommentAuthor {
                id: user.id.clone(),
                name: user.name.clone(),
            },
        })
    }

    /// Comments on an item, newest first.
    pub fn comments(&self, item: &ItemRef) -> Result<Vec<Comment>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, user_name, content, rating, created_at FROM comments
             WHERE item_id = ?1 AND item_type = ?2
             ORDER BY created_at DESC, id DESC",
        )?;

        let comments = stmt
            .query_map(params![item.item_id, item.item_type], |row| {
                Ok(Comment {
                    id: row.get(0)?,
                    user: CommentAuthor {
                        id: row.get(1)?,
                        name: row.get(2)?,
                    },
                    content: row.get(3)?,
                    rating: row.get(4)?,
                    created_at: row.get(5)?,
                    item_id: item.item_id.clone(),
                    item_type: item.item_type.clone(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(comments)
    }

    /// Record a share to `platform`; returns the item's new share count.
    pub fn record_share(&self, item: &ItemRef, platform: &str) -> Result<u64> {
        let platform = platform.trim();
        if platform.is_empty() {
            return Err(WorldiaError::validation(
                "platform",
                "itemId, itemType, and platform are required",
            ));
        }

        {
            let conn = self.lock()?;
            conn.execute(
                "INSERT INTO shares (item_id, item_type, platform, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![item.item_id, item.item_type, platform, timestamp()],
            )?;
        }
        self.share_count(item)
    }

    pub fn share_count(&self, item: &ItemRef) -> Result<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM shares WHERE item_id = ?1 AND item_type = ?2",
            params![item.item_id, item.item_type],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }
}
