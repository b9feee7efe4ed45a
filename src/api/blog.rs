//! Public post pages

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use tera::Context as TeraContext;

use crate::api::state::AppState;
use crate::api::views::{self, PageError, PostLink};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{slug}", get(show_post))
}

/// Location of a post's public page
pub fn post_path(slug: &str) -> String {
    format!("/posts/{}", urlencoding::encode(slug))
}

/// GET /posts
async fn list_posts(State(state): State<AppState>) -> Response {
    let result = render_index(&state).await;
    views::respond(&state.theme_engine, result)
}

async fn render_index(state: &AppState) -> Result<Response, PageError> {
    let posts = state.post_service.list().await?;
    let mut context = TeraContext::new();
    context.insert("links", &PostLink::list(&posts, post_path));
    views::render(&state.theme_engine, "posts/index.html", &context)
}

/// GET /posts/{slug}
async fn show_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let result = render_post(&state, &slug).await;
    views::respond(&state.theme_engine, result)
}

async fn render_post(state: &AppState, slug: &str) -> Result<Response, PageError> {
    let slug = views::require_param("slug", slug)?;
    let post = state
        .post_service
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| PageError::NotFound(slug.to_string()))?;

    let mut context = TeraContext::new();
    context.insert("body_html", &state.post_service.render(&post));
    context.insert("post", &post);
    views::render(&state.theme_engine, "posts/show.html", &context)
}
