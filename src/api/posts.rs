//! Posts JSON API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::models::{NewPost, Post, PostForm};
use crate::services::PostServiceError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{slug}", get(get_post).put(update_post))
}

#[derive(Serialize)]
struct PostsResponse {
    posts: Vec<Post>,
}

#[derive(Serialize)]
struct PostResponse {
    post: Post,
}

/// Validate a submitted body, reporting every failing field in `details`
fn validate(form: &PostForm) -> Result<NewPost, ApiError> {
    form.validate().map_err(|errors| {
        ApiError::with_details(
            "VALIDATION_ERROR",
            "Post is missing required fields",
            serde_json::json!(errors),
        )
    })
}

/// A write rejected for reusing a slug is reported as 409
fn slug_conflict(err: PostServiceError, slug: &str) -> ApiError {
    if err.is_duplicate_slug() {
        ApiError::conflict(format!("Post with slug '{}' already exists", slug))
    } else {
        err.into()
    }
}

async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state.post_service.list().await?;
    Ok(Json(PostsResponse { posts }))
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.post_service.get_by_slug(&slug).await? {
        Some(post) => Ok(Json(PostResponse { post })),
        None => Err(ApiError::not_found(format!("Post {} not found", slug))),
    }
}

async fn create_post(
    State(state): State<AppState>,
    Json(form): Json<PostForm>,
) -> Result<impl IntoResponse, ApiError> {
    let input = validate(&form)?;
    let slug = input.slug.clone();
    let post = state
        .post_service
        .create(input)
        .await
        .map_err(|e| slug_conflict(e, &slug))?;
    Ok((StatusCode::CREATED, Json(PostResponse { post })))
}

async fn update_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(form): Json<PostForm>,
) -> Result<impl IntoResponse, ApiError> {
    let input = validate(&form)?;
    let target = input.slug.clone();
    let post = state
        .post_service
        .update(&slug, input)
        .await
        .map_err(|e| slug_conflict(e, &target))?;
    Ok(Json(PostResponse { post }))
}
