mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use utm_tracker::api::handlers::{country_stats_handler, stats_handler, stats_list_handler};

fn stats_app(state: utm_tracker::AppState) -> Router {
    Router::new()
        .route("/stats", get(stats_list_handler))
        .route("/stats/{id}", get(stats_handler))
        .route("/stats/{id}/countries", get(country_stats_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_stats_for_link(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(stats_app(state)).unwrap();

    let id = common::create_test_link(&pool, "abc123", Some("counted"), "https://example.com").await;
    common::create_test_click(&pool, id, Some("US")).await;
    common::create_test_click(&pool, id, Some("DE")).await;
    common::create_test_click(&pool, id, None).await;

    let response = server.get(&format!("/stats/{id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["link_id"], id);
    assert_eq!(body["video_id"], "abc123");
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
}

#[sqlx::test]
async fn test_stats_includes_enrichment_fields(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(stats_app(state)).unwrap();

    let id = common::create_test_link(&pool, "abc123", Some("enriched"), "https://example.com").await;
    common::create_test_click(&pool, id, Some("US")).await;

    let response = server.get(&format!("/stats/{id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"][0]["country"], "US");
}

#[sqlx::test]
async fn test_stats_unknown_link(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(stats_app(state)).unwrap();

    let response = server.get("/stats/999999").await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_stats_list_totals_per_link(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(stats_app(state)).unwrap();

    let first = common::create_test_link(&pool, "video-a", Some("first"), "https://example.com/1").await;
    let second =
        common::create_test_link(&pool, "video-b", Some("second"), "https://example.com/2").await;

    common::create_test_click(&pool, first, None).await;
    common::create_test_click(&pool, first, None).await;
    common::create_test_click(&pool, second, None).await;

    let response = server.get("/stats").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    let totals: Vec<i64> = items
        .iter()
        .map(|item| item["total"].as_i64().unwrap())
        .collect();
    assert!(totals.contains(&2));
    assert!(totals.contains(&1));
}

#[sqlx::test]
async fn test_stats_list_filters_by_video(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(stats_app(state)).unwrap();

    common::create_test_link(&pool, "video-a", Some("only-a"), "https://example.com/1").await;
    common::create_test_link(&pool, "video-b", Some("only-b"), "https://example.com/2").await;

    let response = server.get("/stats").add_query_param("video_id", "video-a").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["video_id"], "video-a");
}

#[sqlx::test]
async fn test_country_breakdown(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(stats_app(state)).unwrap();

    let id = common::create_test_link(&pool, "abc123", Some("geo"), "https://example.com").await;
    common::create_test_click(&pool, id, Some("US")).await;
    common::create_test_click(&pool, id, Some("US")).await;
    common::create_test_click(&pool, id, Some("DE")).await;
    common::create_test_click(&pool, id, None).await;

    let response = server.get(&format!("/stats/{id}/countries")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);

    // Sorted by total descending; unenriched clicks group under null.
    assert_eq!(items[0]["country"], "US");
    assert_eq!(items[0]["total"], 2);
}

#[sqlx::test]
async fn test_country_breakdown_unknown_link(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(stats_app(state)).unwrap();

    let response = server.get("/stats/999999/countries").await;

    response.assert_status_not_found();
}
