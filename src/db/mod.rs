//! Database layer
//!
//! SQLite is the default backend; MySQL is selected through configuration.
//!
//! ```ignore
//! use inkpost::config::DatabaseConfig;
//! use inkpost::db::{create_pool, schema};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! schema::ensure_schema(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod pool;
pub mod repositories;
pub mod schema;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
