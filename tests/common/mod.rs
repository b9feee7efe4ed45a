#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use tower::ServiceExt;

use inkpost::{
    api::{self, AppState},
    db,
    models::NewPost,
    theme::ThemeEngine,
};

pub async fn setup() -> (Router, AppState) {
    let pool = db::create_test_pool().await.expect("Failed to create test pool");
    db::schema::ensure_schema(&pool)
        .await
        .expect("Failed to ensure schema");
    let state = AppState::new(pool, ThemeEngine::new().expect("Failed to load templates"));
    (api::build_router(state.clone()), state)
}

pub async fn seed(state: &AppState, title: &str, slug: &str, markdown: &str) {
    state
        .post_service
        .create(NewPost::new(title, slug, markdown))
        .await
        .expect("Failed to seed post");
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should respond")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("body should be JSON")
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a location")
        .to_str()
        .expect("location should be ascii")
}
