#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use utm_tracker::config::RedirectTarget;
use utm_tracker::domain::click_event::ClickEvent;
use utm_tracker::infrastructure::cache::NullCache;
use utm_tracker::state::AppState;

pub async fn create_test_link(
    pool: &PgPool,
    video_id: &str,
    slug: Option<&str>,
    destination_url: &str,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO tracking_links
            (video_id, destination_url, utm_campaign, tracking_url, pretty_slug)
        VALUES ($1, $2, $1, $2 || '?utm_source=youtube&utm_medium=video&utm_campaign=' || $1, $3)
        RETURNING id
        "#,
    )
    .bind(video_id)
    .bind(destination_url)
    .bind(slug)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_inactive_link(
    pool: &PgPool,
    video_id: &str,
    slug: Option<&str>,
    destination_url: &str,
) -> i64 {
    let id = create_test_link(pool, video_id, slug, destination_url).await;

    sqlx::query("UPDATE tracking_links SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();

    id
}

pub async fn create_test_click(pool: &PgPool, link_id: i64, country: Option<&str>) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO link_clicks (link_id, country) VALUES ($1, $2) RETURNING id",
    )
    .bind(link_id)
    .bind(country)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_clicks(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM link_clicks WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    create_test_state_with_target(pool, RedirectTarget::Destination)
}

pub fn create_test_state_with_target(
    pool: PgPool,
    target: RedirectTarget,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(Arc::new(pool), tx, Arc::new(NullCache), false, target);

    (state, rx)
}
