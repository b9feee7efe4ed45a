mod common;

use axum::http::StatusCode;
use common::{body_text, get, location, seed, send, setup};

#[tokio::test]
async fn root_redirects_to_posts() {
    let (app, _state) = setup().await;

    let response = send(&app, get("/")).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/posts");
}

#[tokio::test]
async fn index_links_every_post() {
    let (app, state) = setup().await;
    seed(&state, "Hello World", "hello-world", "body").await;

    let response = send(&app, get("/posts")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains(r#"<a href="/posts/hello-world">Hello World</a>"#));
}

#[tokio::test]
async fn show_renders_markdown() {
    let (app, state) = setup().await;
    seed(&state, "Intro", "intro", "## Section\n\nSome *text*.").await;

    let response = send(&app, get("/posts/intro")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<h1>Intro</h1>"));
    assert!(html.contains("<h2>Section</h2>"));
    assert!(html.contains("<em>text</em>"));
}

#[tokio::test]
async fn show_escapes_raw_html() {
    let (app, state) = setup().await;
    seed(&state, "Raw", "raw", "<script>alert(1)</script>").await;

    let html = body_text(send(&app, get("/posts/raw")).await).await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn show_missing_post_is_not_found() {
    let (app, _state) = setup().await;

    let response = send(&app, get("/posts/missing")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Post missing not found"));
}
