//! Shared application state

use std::sync::Arc;

use crate::db::repositories::SqlxPostRepository;
use crate::db::DynDatabasePool;
use crate::services::PostService;
use crate::theme::ThemeEngine;

/// Application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub post_service: Arc<PostService>,
    pub theme_engine: Arc<ThemeEngine>,
}

impl AppState {
    /// Wire the post repository and service onto an open pool
    pub fn new(pool: DynDatabasePool, theme_engine: ThemeEngine) -> Self {
        let post_repo = SqlxPostRepository::boxed(pool.clone());
        Self {
            pool,
            post_service: Arc::new(PostService::new(post_repo)),
            theme_engine: Arc::new(theme_engine),
        }
    }
}
