mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use utm_tracker::api::handlers::{
    create_link_handler, deactivate_link_handler, delete_link_handler, get_link_handler,
    list_links_handler, regenerate_slug_handler,
};

fn links_app(state: utm_tracker::AppState) -> Router {
    Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route("/links/{id}", get(get_link_handler).delete(delete_link_handler))
        .route("/links/{id}/deactivate", post(deactivate_link_handler))
        .route("/links/{id}/slug", post(regenerate_slug_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_create_link_with_defaults(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(links_app(state)).unwrap();

    let response = server
        .post("/links")
        .json(&json!({
            "video_id": "abc123",
            "destination_url": "https://example.com/page"
        }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["tracking_url"],
        "https://example.com/page?utm_source=youtube&utm_medium=video&utm_campaign=abc123"
    );
    assert_eq!(body["utm_source"], "youtube");
    assert_eq!(body["utm_medium"], "video");
    assert_eq!(body["utm_campaign"], "abc123");
    assert_eq!(body["is_active"], true);
    // A slug is allocated by default.
    assert_eq!(body["pretty_slug"].as_str().unwrap().len(), 8);
}

#[sqlx::test]
async fn test_create_link_with_custom_slug(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(links_app(state)).unwrap();

    let response = server
        .post("/links")
        .json(&json!({
            "video_id": "abc123",
            "destination_url": "https://example.com",
            "pretty_slug": "spring-promo"
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["pretty_slug"], "spring-promo");
}

#[sqlx::test]
async fn test_create_link_without_slug(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(links_app(state)).unwrap();

    let response = server
        .post("/links")
        .json(&json!({
            "video_id": "abc123",
            "destination_url": "https://example.com",
            "slug": false
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert!(body["pretty_slug"].is_null());
}

#[sqlx::test]
async fn test_create_link_duplicate_slug_conflict(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(links_app(state)).unwrap();

    let first = server
        .post("/links")
        .json(&json!({
            "video_id": "abc123",
            "destination_url": "https://example.com/one",
            "pretty_slug": "taken-slug"
        }))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = server
        .post("/links")
        .json(&json!({
            "video_id": "xyz789",
            "destination_url": "https://example.com/two",
            "pretty_slug": "taken-slug"
        }))
        .await;

    assert_eq!(second.status_code(), 409);
    let body: serde_json::Value = second.json();
    assert_eq!(body["error"]["code"], "conflict");
}

#[sqlx::test]
async fn test_create_link_invalid_url(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(links_app(state)).unwrap();

    let response = server
        .post("/links")
        .json(&json!({
            "video_id": "abc123",
            "destination_url": "not-a-url"
        }))
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_create_link_utm_overrides(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(links_app(state)).unwrap();

    let response = server
        .post("/links")
        .json(&json!({
            "video_id": "abc123",
            "destination_url": "https://example.com",
            "utm_source": "newsletter",
            "utm_medium": "email",
            "utm_campaign": "spring-launch",
            "utm_content": "footer"
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["utm_source"], "newsletter");
    assert_eq!(body["utm_campaign"], "spring-launch");
    let tracking_url = body["tracking_url"].as_str().unwrap();
    assert!(tracking_url.contains("utm_source=newsletter"));
    assert!(tracking_url.contains("utm_content=footer"));
}

#[sqlx::test]
async fn test_get_link(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(links_app(state)).unwrap();

    let id = common::create_test_link(&pool, "abc123", Some("fetchme"), "https://example.com").await;

    let response = server.get(&format!("/links/{id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["video_id"], "abc123");
    assert_eq!(body["pretty_slug"], "fetchme");
}

#[sqlx::test]
async fn test_get_link_not_found(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(links_app(state)).unwrap();

    let response = server.get("/links/999999").await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_list_links_by_video(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(links_app(state)).unwrap();

    common::create_test_link(&pool, "video-a", Some("slug-a1"), "https://example.com/1").await;
    common::create_test_link(&pool, "video-a", Some("slug-a2"), "https://example.com/2").await;
    common::create_test_link(&pool, "video-b", Some("slug-b1"), "https://example.com/3").await;

    let response = server.get("/links").add_query_param("video_id", "video-a").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["pagination"]["total_items"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[sqlx::test]
async fn test_deactivate_link_idempotent(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(links_app(state)).unwrap();

    let id = common::create_test_link(&pool, "abc123", Some("soon-off"), "https://example.com").await;

    let first = server.post(&format!("/links/{id}/deactivate")).await;
    first.assert_status_ok();
    let body: serde_json::Value = first.json();
    assert_eq!(body["is_active"], false);

    // Second deactivation still succeeds.
    let second = server.post(&format!("/links/{id}/deactivate")).await;
    second.assert_status_ok();
}

#[sqlx::test]
async fn test_regenerate_slug(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(links_app(state)).unwrap();

    let id = common::create_test_link(&pool, "abc123", Some("old-slug"), "https://example.com").await;

    let response = server.post(&format!("/links/{id}/slug")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let new_slug = body["pretty_slug"].as_str().unwrap();
    assert_ne!(new_slug, "old-slug");
    assert_eq!(new_slug.len(), 8);
}

#[sqlx::test]
async fn test_delete_link_cascades_clicks(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(links_app(state)).unwrap();

    let id = common::create_test_link(&pool, "abc123", Some("doomed"), "https://example.com").await;
    common::create_test_click(&pool, id, Some("US")).await;
    common::create_test_click(&pool, id, None).await;

    assert_eq!(common::count_clicks(&pool, id).await, 2);

    let response = server.delete(&format!("/links/{id}")).await;
    assert_eq!(response.status_code(), 204);

    // No orphaned click rows remain.
    assert_eq!(common::count_clicks(&pool, id).await, 0);

    let gone = server.get(&format!("/links/{id}")).await;
    gone.assert_status_not_found();
}
