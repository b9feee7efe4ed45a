//! Post repository
//!
//! The only component that talks to the store about posts. Every method is a
//! single statement (update re-reads the row afterwards) and failures are
//! returned as-is.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{NewPost, Post};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

const SELECT_POST: &str = "SELECT slug, title, markdown, created_at, updated_at FROM posts";

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest first
    async fn list(&self) -> Result<Vec<Post>>;
    /// `Ok(None)` when no post has this slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>>;
    /// Insert a post; a duplicate slug is rejected by the store
    async fn create(&self, input: &NewPost) -> Result<Post>;
    /// Overwrite the post stored under `slug`; `Ok(None)` when nothing matched
    async fn update(&self, slug: &str, input: &NewPost) -> Result<Option<Post>>;
}

pub struct SqlxPostRepository {
    pool: DynDatabasePool,
}

impl SqlxPostRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }

    fn sqlite(&self) -> Result<&SqlitePool> {
        self.pool
            .as_sqlite()
            .context("Database pool is not SQLite")
    }

    fn mysql(&self) -> Result<&MySqlPool> {
        self.pool.as_mysql().context("Database pool is not MySQL")
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn list(&self) -> Result<Vec<Post>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.sqlite()?).await,
            DatabaseDriver::Mysql => list_mysql(self.mysql()?).await,
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_slug_sqlite(self.sqlite()?, slug).await,
            DatabaseDriver::Mysql => get_by_slug_mysql(self.mysql()?, slug).await,
        }
    }

    async fn create(&self, input: &NewPost) -> Result<Post> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.sqlite()?, input).await,
            DatabaseDriver::Mysql => create_mysql(self.mysql()?, input).await,
        }
    }

    async fn update(&self, slug: &str, input: &NewPost) -> Result<Option<Post>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => update_sqlite(self.sqlite()?, slug, input).await,
            DatabaseDriver::Mysql => update_mysql(self.mysql()?, slug, input).await,
        }
    }
}

/// Whether `err` is the store rejecting a second post with the same slug
pub fn is_duplicate_slug(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<sqlx::Error>())
        .any(|e| matches!(e, sqlx::Error::Database(db) if db.is_unique_violation()))
}

// SQLite implementations
async fn list_sqlite(pool: &SqlitePool) -> Result<Vec<Post>> {
    let rows = sqlx::query(&format!("{SELECT_POST} ORDER BY created_at DESC"))
        .fetch_all(pool)
        .await
        .context("Failed to list posts")?;
    rows.iter().map(row_to_post_sqlite).collect()
}

async fn get_by_slug_sqlite(pool: &SqlitePool, slug: &str) -> Result<Option<Post>> {
    let row = sqlx::query(&format!("{SELECT_POST} WHERE slug = ?"))
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("Failed to get post")?;
    row.map(|r| row_to_post_sqlite(&r)).transpose()
}

async fn create_sqlite(pool: &SqlitePool, input: &NewPost) -> Result<Post> {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO posts (slug, title, markdown, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&input.slug)
    .bind(&input.title)
    .bind(&input.markdown)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create post")?;

    Ok(Post {
        slug: input.slug.clone(),
        title: input.title.clone(),
        markdown: input.markdown.clone(),
        created_at: now,
        updated_at: now,
    })
}

async fn update_sqlite(pool: &SqlitePool, slug: &str, input: &NewPost) -> Result<Option<Post>> {
    let result = sqlx::query(
        "UPDATE posts SET slug = ?, title = ?, markdown = ?, updated_at = ? WHERE slug = ?",
    )
    .bind(&input.slug)
    .bind(&input.title)
    .bind(&input.markdown)
    .bind(Utc::now())
    .bind(slug)
    .execute(pool)
    .await
    .context("Failed to update post")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_by_slug_sqlite(pool, &input.slug).await
}

fn row_to_post_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Post> {
    Ok(Post {
        slug: row.try_get("slug")?,
        title: row.try_get("title")?,
        markdown: row.try_get("markdown")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// MySQL implementations
async fn list_mysql(pool: &MySqlPool) -> Result<Vec<Post>> {
    let rows = sqlx::query(&format!("{SELECT_POST} ORDER BY created_at DESC"))
        .fetch_all(pool)
        .await
        .context("Failed to list posts")?;
    rows.iter().map(row_to_post_mysql).collect()
}

async fn get_by_slug_mysql(pool: &MySqlPool, slug: &str) -> Result<Option<Post>> {
    let row = sqlx::query(&format!("{SELECT_POST} WHERE slug = ?"))
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("Failed to get post")?;
    row.map(|r| row_to_post_mysql(&r)).transpose()
}

async fn create_mysql(pool: &MySqlPool, input: &NewPost) -> Result<Post> {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO posts (slug, title, markdown, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&input.slug)
    .bind(&input.title)
    .bind(&input.markdown)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create post")?;

    Ok(Post {
        slug: input.slug.clone(),
        title: input.title.clone(),
        markdown: input.markdown.clone(),
        created_at: now,
        updated_at: now,
    })
}

async fn update_mysql(pool: &MySqlPool, slug: &str, input: &NewPost) -> Result<Option<Post>> {
    let result = sqlx::query(
        "UPDATE posts SET slug = ?, title = ?, markdown = ?, updated_at = ? WHERE slug = ?",
    )
    .bind(&input.slug)
    .bind(&input.title)
    .bind(&input.markdown)
    .bind(Utc::now())
    .bind(slug)
    .execute(pool)
    .await
    .context("Failed to update post")?;

    // updated_at always changes, so a matched row is always counted
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_by_slug_mysql(pool, &input.slug).await
}

fn row_to_post_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Post> {
    Ok(Post {
        slug: row.try_get("slug")?,
        title: row.try_get("title")?,
        markdown: row.try_get("markdown")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
