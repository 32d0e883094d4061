//! Top-level router composition.

use axum::{Router, routing::get};
use tower::Layer as _;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{redirect_by_id_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::api::routes::api_routes;
use crate::state::AppState;

/// Builds the full application router.
///
/// The management API under `/api` is rate limited; the redirect routes are
/// not — bursty click traffic is absorbed by the bounded click queue
/// instead. `/{slug}` is registered last so the more specific `/api` and
/// `/r` trees win.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .nest("/api", api_routes().layer(rate_limit::layer()))
        .route("/r/{id}", get(redirect_by_id_handler))
        .route("/{slug}", get(redirect_handler))
        .layer(tracing::layer())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
