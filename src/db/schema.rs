//! Schema bootstrap
//!
//! Creates the `posts` table when it is missing. Statements are idempotent and
//! there is no version history: the schema is applied as-is on every startup.

use anyhow::{Context, Result};

use super::DynDatabasePool;
use crate::config::DatabaseDriver;

const POSTS_SQLITE: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        slug VARCHAR(255) PRIMARY KEY NOT NULL,
        title VARCHAR(255) NOT NULL,
        markdown TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at);
"#;

// MySQL has no `CREATE INDEX IF NOT EXISTS`, so the index lives in the table body.
const POSTS_MYSQL: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        slug VARCHAR(255) PRIMARY KEY NOT NULL,
        title VARCHAR(255) NOT NULL,
        markdown TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        INDEX idx_posts_created_at (created_at)
    );
"#;

/// Create every table the application needs.
///
/// Returns the number of statements executed.
pub async fn ensure_schema(pool: &DynDatabasePool) -> Result<usize> {
    let sql = match pool.driver() {
        DatabaseDriver::Sqlite => POSTS_SQLITE,
        DatabaseDriver::Mysql => POSTS_MYSQL,
    };

    let statements = split_sql_statements(sql);
    for statement in &statements {
        pool.execute(statement)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    tracing::debug!("Schema ensured ({} statements)", statements.len());
    Ok(statements.len())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    match sql.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}

/// Split SQL into individual statements, dropping comment-only fragments
fn split_sql_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty() && !is_comment_only(stmt))
        .collect()
}

fn is_comment_only(s: &str) -> bool {
    s.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with("--"))
}
