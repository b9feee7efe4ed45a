//! Post model
//!
//! This module provides:
//! - `Post` entity, the only persisted record
//! - `NewPost`, the full set of writable fields
//! - `PostForm` / `PostFormErrors`, the submitted form and its validation outcome

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TITLE_REQUIRED: &str = "Title is required!";
pub const SLUG_REQUIRED: &str = "Slug is required!";
pub const MARKDOWN_REQUIRED: &str = "Markdown is required!";

/// Post entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL identifier, unique in the store
    pub slug: String,
    /// Display name
    pub title: String,
    /// Raw markdown body
    pub markdown: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of a post, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub markdown: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        markdown: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            markdown: markdown.into(),
        }
    }
}

impl From<&Post> for NewPost {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            markdown: post.markdown.clone(),
        }
    }
}

/// Submitted post form.
///
/// Every field is optional so that a missing key reaches validation instead
/// of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
}

/// Per-field validation messages; `None` means the field passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostFormErrors {
    pub title: Option<&'static str>,
    pub slug: Option<&'static str>,
    pub markdown: Option<&'static str>,
}

impl PostFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.markdown.is_none()
    }
}

/// A field is present when it was submitted with a non-empty value.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl PostForm {
    /// Check that all three fields are present.
    ///
    /// Presence is the only rule: slug format, uniqueness and markdown content
    /// are not inspected here.
    pub fn validate(&self) -> Result<NewPost, PostFormErrors> {
        let title = present(&self.title);
        let slug = present(&self.slug);
        let markdown = present(&self.markdown);

        match (title, slug, markdown) {
            (Some(title), Some(slug), Some(markdown)) => Ok(NewPost::new(title, slug, markdown)),
            _ => Err(PostFormErrors {
                title: title.is_none().then_some(TITLE_REQUIRED),
                slug: slug.is_none().then_some(SLUG_REQUIRED),
                markdown: markdown.is_none().then_some(MARKDOWN_REQUIRED),
            }),
        }
    }

    /// Submitted values, with missing fields as empty strings, for re-rendering
    pub fn values(&self) -> NewPost {
        NewPost {
            title: self.title.clone().unwrap_or_default(),
            slug: self.slug.clone().unwrap_or_default(),
            markdown: self.markdown.clone().unwrap_or_default(),
        }
    }
}

impl From<NewPost> for PostForm {
    fn from(input: NewPost) -> Self {
        Self {
            title: Some(input.title),
            slug: Some(input.slug),
            markdown: Some(input.markdown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(title: &str, slug: &str, markdown: &str) -> PostForm {
        PostForm::from(NewPost::new(title, slug, markdown))
    }

    #[test]
    fn test_complete_form_is_valid() {
        let input = form("Hello", "hello-world", "# Hi").validate().unwrap();
        assert_eq!(input, NewPost::new("Hello", "hello-world", "# Hi"));
    }

    #[test]
    fn test_empty_title_reports_only_title() {
        let errors = form("", "x", "y").validate().unwrap_err();

        assert_eq!(
            serde_json::to_value(errors).unwrap(),
            serde_json::json!({
                "title": "Title is required!",
                "slug": null,
                "markdown": null,
            })
        );
    }

    #[test]
    fn test_missing_fields_report_every_field() {
        let errors = PostForm::default().validate().unwrap_err();

        assert_eq!(errors.title, Some(TITLE_REQUIRED));
        assert_eq!(errors.slug, Some(SLUG_REQUIRED));
        assert_eq!(errors.markdown, Some(MARKDOWN_REQUIRED));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_validation_is_presence_only() {
        // No format check on slugs, whitespace counts as present.
        let input = form(" ", "Not A Slug!", " ").validate().unwrap();
        assert_eq!(input.slug, "Not A Slug!");
    }

    #[test]
    fn test_values_fill_missing_with_empty() {
        let partial = PostForm {
            title: Some("Draft".to_string()),
            slug: None,
            markdown: None,
        };
        assert_eq!(partial.values(), NewPost::new("Draft", "", ""));
    }

    #[test]
    fn test_form_deserializes_with_missing_keys() {
        let parsed: PostForm = serde_json::from_value(serde_json::json!({ "slug": "x" })).unwrap();
        assert!(parsed.title.is_none());
        assert_eq!(parsed.slug.as_deref(), Some("x"));
        assert!(parsed.markdown.is_none());
    }

    fn field() -> impl Strategy<Value = Option<String>> {
        prop_oneof![Just(None), Just(Some(String::new())), "[a-z0-9 -]{1,16}".prop_map(Some)]
    }

    proptest! {
        #[test]
        fn validation_errors_mirror_missing_fields(title in field(), slug in field(), markdown in field()) {
            let form = PostForm { title: title.clone(), slug: slug.clone(), markdown: markdown.clone() };
            let missing = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);

            match form.validate() {
                Ok(input) => {
                    prop_assert!(!missing(&title) && !missing(&slug) && !missing(&markdown));
                    prop_assert_eq!(Some(input.title), title);
                    prop_assert_eq!(Some(input.slug), slug);
                    prop_assert_eq!(Some(input.markdown), markdown);
                }
                Err(errors) => {
                    prop_assert!(!errors.is_empty());
                    prop_assert_eq!(errors.title.is_some(), missing(&title));
                    prop_assert_eq!(errors.slug.is_some(), missing(&slug));
                    prop_assert_eq!(errors.markdown.is_some(), missing(&markdown));
                }
            }
        }
    }
}
