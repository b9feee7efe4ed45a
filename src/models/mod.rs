//! Data models
//!
//! The `Post` entity and the typed inputs that flow into it.

mod post;

pub use post::{
    NewPost, Post, PostForm, PostFormErrors, MARKDOWN_REQUIRED, SLUG_REQUIRED, TITLE_REQUIRED,
};
