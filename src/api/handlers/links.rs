//! Handlers for tracking-link management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkListResponse, LinkResponse};
use crate::api::dto::pagination::{ListQueryParams, PaginationMeta};
use crate::application::services::CreateLinkCommand;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;

/// Creates a tracking link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "video_id": "abc123",
///   "destination_url": "https://example.com/page",
///   "utm_campaign": "spring-launch",   // optional, defaults to video_id
///   "pretty_slug": "spring-promo",     // optional caller-chosen slug
///   "slug": true                        // optional, false skips slug allocation
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request — invalid destination URL or slug shape
/// - 409 Conflict — the requested slug is already taken
/// - 503 Service Unavailable — slug generation exhausted its attempts
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_tracking_link(CreateLinkCommand {
            video_id: payload.video_id,
            destination_url: payload.destination_url,
            utm_source: payload.utm_source,
            utm_medium: payload.utm_medium,
            utm_campaign: payload.utm_campaign,
            utm_content: payload.utm_content,
            utm_term: payload.utm_term,
            slug_candidate: payload.pretty_slug,
            allocate_slug: payload.slug,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Retrieves a tracking link by id.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown id.
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(id).await?;

    Ok(Json(link.into()))
}

/// Lists tracking links newest-first.
///
/// # Endpoint
///
/// `GET /api/links?video_id=&page=&page_size=`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let video_id = params.video_id.as_deref();

    let links = state.link_service.list_links(video_id, offset, limit).await?;
    let total = state.link_service.count_links(video_id).await?;

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta::new(&params.pagination, total),
        items: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Deactivates a tracking link so its slug stops resolving.
///
/// # Endpoint
///
/// `POST /api/links/{id}/deactivate`
///
/// Idempotent: deactivating an already-inactive link succeeds.
///
/// # Cache
///
/// The cached slug resolution is invalidated immediately so the next visit
/// reflects the deactivated state without waiting for TTL expiry.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown id.
pub async fn deactivate_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.deactivate_link(id).await?;

    if let Some(slug) = &link.pretty_slug
        && let Err(e) = state.cache.invalidate(slug).await
    {
        tracing::warn!(error = ?e, slug, "Failed to invalidate cache after deactivate");
    }

    Ok(Json(link.into()))
}

/// Replaces a link's pretty slug with a freshly generated one.
///
/// # Endpoint
///
/// `POST /api/links/{id}/slug`
///
/// The previous slug stops resolving immediately.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown id.
/// Returns 503 Service Unavailable when slug generation exhausts its attempts.
pub async fn regenerate_slug_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    // Fetch first so the old slug can be evicted from cache.
    let old_slug = state.link_service.get_link(id).await?.pretty_slug;

    let link = state.link_service.regenerate_slug(id).await?;

    if let Some(slug) = &old_slug
        && let Err(e) = state.cache.invalidate(slug).await
    {
        tracing::warn!(error = ?e, slug, "Failed to invalidate cache after slug change");
    }

    Ok(Json(link.into()))
}

/// Hard-deletes a tracking link and all of its click events.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// Destructive: click history is removed by cascade. Prefer deactivation for
/// routine retirement of links.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown id.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let link = state.link_service.delete_link(id).await?;

    if let Some(slug) = &link.pretty_slug
        && let Err(e) = state.cache.invalidate(slug).await
    {
        tracing::warn!(error = ?e, slug, "Failed to invalidate cache after delete");
    }

    Ok(StatusCode::NO_CONTENT)
}
