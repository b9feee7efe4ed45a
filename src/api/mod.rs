//! API layer - HTTP handlers and routing
//!
//! - `/posts`, `/posts/{slug}`: public post pages
//! - `/posts/admin/...`: admin index, create form, edit handler
//! - `/api/v1/...`: JSON posts API and health check

pub mod admin;
pub mod blog;
pub mod error;
pub mod posts;
pub mod site;
pub mod state;
pub mod views;

use axum::{response::Redirect, routing::get, Router};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;
pub use views::PageError;

/// Build the JSON API router
pub fn build_api_router() -> Router<AppState> {
    Router::new().merge(posts::router()).merge(site::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/posts") }))
        .merge(blog::router())
        .merge(admin::router())
        .nest("/api/v1", build_api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
