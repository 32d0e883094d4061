//! Handlers for visit resolution and redirection.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;

use crate::application::services::VisitContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a pretty slug to its target URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Request Flow
///
/// 1. Capture the raw visit context (IP, user agent, referrer)
/// 2. Resolve the active link (cache first, then database)
/// 3. Enqueue the click event (fire-and-forget)
/// 4. Return 307 Temporary Redirect
///
/// # Click Tracking
///
/// Click events go to a bounded channel for async enrichment and
/// persistence. A full queue drops the event; the redirect never fails
/// because of click recording.
///
/// # Errors
///
/// Returns 404 Not Found for unknown and deactivated slugs alike.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let visit = visit_context(&headers, addr, state.behind_proxy);

    let target = state.redirect_service.resolve_slug(&slug, visit).await?;

    Ok(Redirect::temporary(&target))
}

/// Redirects a link by numeric id (for links without a pretty slug).
///
/// # Endpoint
///
/// `GET /r/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for unknown and deactivated links alike.
pub async fn redirect_by_id_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let visit = visit_context(&headers, addr, state.behind_proxy);

    let target = state.redirect_service.resolve_id(id, visit).await?;

    Ok(Redirect::temporary(&target))
}

/// Captures the raw request context for click recording.
fn visit_context(headers: &HeaderMap, addr: SocketAddr, behind_proxy: bool) -> VisitContext {
    VisitContext {
        ip_address: Some(client_ip(headers, addr, behind_proxy)),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
        referrer: headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
    }
}
