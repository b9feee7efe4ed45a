//! HTML responses and the error boundary for server-rendered routes

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tera::Context as TeraContext;

use crate::models::Post;
use crate::services::PostServiceError;
use crate::theme::{ThemeEngine, ThemeError};

/// Fatal errors of an HTML request. None of them is recoverable within the
/// request; each becomes a rendered `error.html` page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// A required route parameter was empty
    #[error("params.{0} is required")]
    MissingParam(&'static str),

    #[error("Post {0} not found")]
    NotFound(String),

    #[error("storage failure: {0:#}")]
    Storage(anyhow::Error),

    #[error(transparent)]
    Render(#[from] ThemeError),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParam(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the visitor; internal failures stay in the log
    fn public_message(&self) -> String {
        match self {
            Self::MissingParam(_) | Self::NotFound(_) => self.to_string(),
            Self::Storage(_) | Self::Render(_) => "Something went wrong".to_string(),
        }
    }
}

impl From<PostServiceError> for PageError {
    fn from(err: PostServiceError) -> Self {
        match err {
            PostServiceError::NotFound(slug) => Self::NotFound(slug),
            PostServiceError::Storage(e) => Self::Storage(e),
        }
    }
}

/// A post title paired with an already-encoded link
#[derive(Debug, Serialize)]
pub struct PostLink<'a> {
    pub title: &'a str,
    pub href: String,
}

impl<'a> PostLink<'a> {
    pub fn list(posts: &'a [Post], href: impl Fn(&str) -> String) -> Vec<Self> {
        posts
            .iter()
            .map(|post| PostLink {
                title: &post.title,
                href: href(&post.slug),
            })
            .collect()
    }
}

/// Reject an empty route parameter
pub fn require_param<'a>(name: &'static str, value: &'a str) -> Result<&'a str, PageError> {
    if value.is_empty() {
        Err(PageError::MissingParam(name))
    } else {
        Ok(value)
    }
}

/// Render `template` with a 200 status
pub fn render(
    theme: &ThemeEngine,
    template: &str,
    context: &TeraContext,
) -> Result<Response, PageError> {
    let html = theme.render(template, context)?;
    Ok((StatusCode::OK, Html(html)).into_response())
}

/// Turn a handler outcome into a response, rendering fatal errors
pub fn respond(theme: &ThemeEngine, result: Result<Response, PageError>) -> Response {
    match result {
        Ok(response) => response,
        Err(err) => error_page(theme, err),
    }
}

pub fn error_page(theme: &ThemeEngine, err: PageError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!("{}", err);
    } else {
        tracing::debug!("{}", err);
    }

    let message = err.public_message();
    let mut context = TeraContext::new();
    context.insert("status", &status.as_u16());
    context.insert("message", &message);

    match theme.render("error.html", &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            (status, message).into_response()
        }
    }
}
