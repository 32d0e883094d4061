//! API route configuration.

use crate::api::handlers::{
    country_stats_handler, create_link_handler, deactivate_link_handler, delete_link_handler,
    get_link_handler, health_handler, list_links_handler, regenerate_slug_handler, stats_handler,
    stats_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Management and analytics routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /health`                - Component health
/// - `POST   /links`                 - Create a tracking link
/// - `GET    /links`                 - List links (filter by video id)
/// - `GET    /links/{id}`            - Fetch a link
/// - `DELETE /links/{id}`            - Hard-delete a link (clicks cascade)
/// - `POST   /links/{id}/deactivate` - Deactivate a link
/// - `POST   /links/{id}/slug`       - Regenerate the pretty slug
/// - `GET    /stats`                 - Per-link click totals (paginated)
/// - `GET    /stats/{id}`            - Detailed click records for a link
/// - `GET    /stats/{id}/countries`  - Clicks grouped by country
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/links",
            post(create_link_handler).get(list_links_handler),
        )
        .route(
            "/links/{id}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/links/{id}/deactivate", post(deactivate_link_handler))
        .route("/links/{id}/slug", post(regenerate_slug_handler))
        .route("/stats", get(stats_list_handler))
        .route("/stats/{id}", get(stats_handler))
        .route("/stats/{id}/countries", get(country_stats_handler))
}
