//! Post admin: index, create form, and the edit handler
//!
//! The edit route has two states per request:
//! - load (`GET /posts/admin/{slug}`): fetch the post and render the
//!   pre-filled form; an empty slug or an unknown post is fatal
//! - submit (`POST /posts/admin/{slug}`): validate the three fields, then
//!   either re-render with inline errors or update and redirect

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tera::Context as TeraContext;

use crate::api::state::AppState;
use crate::api::views::{self, PageError, PostLink};
use crate::models::{NewPost, PostForm, PostFormErrors};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts/admin", get(admin_index))
        .route("/posts/admin/new", get(new_post_form).post(create_post))
        .route("/posts/admin/{slug}", get(edit_post_form).post(update_post))
}

/// Location of a post's edit page
pub fn edit_path(slug: &str) -> String {
    format!("/posts/admin/{}", urlencoding::encode(slug))
}

/// Which form is being rendered
enum FormMode<'a> {
    Create,
    Edit { slug: &'a str },
}

impl FormMode<'_> {
    fn heading(&self) -> &'static str {
        match self {
            Self::Create => "New Post",
            Self::Edit { .. } => "Edit Post",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Create Post",
            Self::Edit { .. } => "Update Post",
        }
    }

    fn action(&self) -> String {
        match self {
            Self::Create => "/posts/admin/new".to_string(),
            Self::Edit { slug } => edit_path(slug),
        }
    }
}

fn render_form(
    state: &AppState,
    mode: FormMode<'_>,
    values: &NewPost,
    errors: &PostFormErrors,
) -> Result<Response, PageError> {
    let mut context = TeraContext::new();
    context.insert("heading", mode.heading());
    context.insert("submit_label", mode.submit_label());
    context.insert("action", &mode.action());
    context.insert("values", values);
    context.insert("errors", errors);
    views::render(&state.theme_engine, "admin/edit.html", &context)
}

/// GET /posts/admin
async fn admin_index(State(state): State<AppState>) -> Response {
    let result = list_posts(&state).await;
    views::respond(&state.theme_engine, result)
}

async fn list_posts(state: &AppState) -> Result<Response, PageError> {
    let posts = state.post_service.list().await?;
    let mut context = TeraContext::new();
    context.insert("links", &PostLink::list(&posts, edit_path));
    views::render(&state.theme_engine, "admin/index.html", &context)
}

/// GET /posts/admin/new
async fn new_post_form(State(state): State<AppState>) -> Response {
    let result = render_form(
        &state,
        FormMode::Create,
        &NewPost::default(),
        &PostFormErrors::default(),
    );
    views::respond(&state.theme_engine, result)
}

/// POST /posts/admin/new
async fn create_post(State(state): State<AppState>, Form(form): Form<PostForm>) -> Response {
    let result = submit_new_post(&state, form).await;
    views::respond(&state.theme_engine, result)
}

async fn submit_new_post(state: &AppState, form: PostForm) -> Result<Response, PageError> {
    match form.validate() {
        Err(errors) => render_form(state, FormMode::Create, &form.values(), &errors),
        Ok(input) => {
            let post = state.post_service.create(input).await?;
            Ok(Redirect::to(&edit_path(&post.slug)).into_response())
        }
    }
}

/// GET /posts/admin/{slug}
async fn edit_post_form(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let result = load_post_form(&state, &slug).await;
    views::respond(&state.theme_engine, result)
}

async fn load_post_form(state: &AppState, slug: &str) -> Result<Response, PageError> {
    let slug = views::require_param("slug", slug)?;
    let post = state
        .post_service
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| PageError::NotFound(slug.to_string()))?;

    render_form(
        state,
        FormMode::Edit { slug: &post.slug },
        &NewPost::from(&post),
        &PostFormErrors::default(),
    )
}

/// POST /posts/admin/{slug}
async fn update_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<PostForm>,
) -> Response {
    let result = submit_post_form(&state, &slug, form).await;
    views::respond(&state.theme_engine, result)
}

async fn submit_post_form(
    state: &AppState,
    slug: &str,
    form: PostForm,
) -> Result<Response, PageError> {
    let slug = views::require_param("slug", slug)?;

    match form.validate() {
        Err(errors) => {
            tracing::debug!(slug = %slug, ?errors, "Post form rejected");
            render_form(state, FormMode::Edit { slug }, &form.values(), &errors)
        }
        Ok(input) => {
            let post = state.post_service.update(slug, input).await?;
            Ok(Redirect::to(&edit_path(&post.slug)).into_response())
        }
    }
}
