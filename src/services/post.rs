//! Post service
//!
//! Thin layer over [`PostRepository`]: turns an update miss into
//! [`PostServiceError::NotFound`] and passes every storage failure through
//! untouched.

use crate::db::repositories::{is_duplicate_slug, PostRepository};
use crate::models::{NewPost, Post};
use crate::services::MarkdownRenderer;
use std::sync::Arc;

/// Error types for post service operations
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    /// No post is stored under the slug
    #[error("Post {0} not found")]
    NotFound(String),

    /// The store rejected or failed the operation
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl PostServiceError {
    /// The store refused a write because another post already has the slug
    pub fn is_duplicate_slug(&self) -> bool {
        matches!(self, Self::Storage(e) if is_duplicate_slug(e))
    }
}

pub struct PostService {
    repo: Arc<dyn PostRepository>,
    markdown: MarkdownRenderer,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            repo,
            markdown: MarkdownRenderer::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Post>, PostServiceError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, PostServiceError> {
        Ok(self.repo.get_by_slug(slug).await?)
    }

    pub async fn create(&self, input: NewPost) -> Result<Post, PostServiceError> {
        let post = self.repo.create(&input).await?;
        tracing::info!(slug = %post.slug, "Post created");
        Ok(post)
    }

    /// Overwrite the post currently stored under `slug` with `input`.
    ///
    /// `input.slug` may differ from `slug`, which renames the post.
    pub async fn update(&self, slug: &str, input: NewPost) -> Result<Post, PostServiceError> {
        let post = self
            .repo
            .update(slug, &input)
            .await?
            .ok_or_else(|| PostServiceError::NotFound(slug.to_string()))?;

        if post.slug != slug {
            tracing::info!(from = %slug, to = %post.slug, "Post updated and renamed");
        } else {
            tracing::info!(slug = %post.slug, "Post updated");
        }
        Ok(post)
    }

    /// Rendered HTML body of a post
    pub fn render(&self, post: &Post) -> String {
        self.markdown.render(&post.markdown)
    }
}
