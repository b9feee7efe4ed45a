//! Services layer - Business logic
//!
//! Services coordinate repositories and rendering and own the error types the
//! HTTP layer maps to responses.

pub mod markdown;
pub mod post;

pub use markdown::MarkdownRenderer;
pub use post::{PostService, PostServiceError};
