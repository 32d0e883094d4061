//! Handlers for click statistics endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::pagination::{PaginationMeta, StatsQueryParams};
use crate::api::dto::stats::{
    CountryBreakdownResponse, CountryCountItem, LinkStatsItem, StatsListResponse, StatsResponse,
};
use crate::api::dto::{clicks::ClickInfo, pagination::DateFilterParams};
use crate::domain::repositories::StatsFilter;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;

/// Retrieves detailed statistics for a specific tracking link.
///
/// # Endpoint
///
/// `GET /api/stats/{id}`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 1000)
/// - `from` (optional): Start date (RFC3339 format)
/// - `to` (optional): End date (RFC3339 format)
///
/// # Response
///
/// Returns link metadata, total click count, and paginated click records
/// with their enrichment fields.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown link id.
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<StatsQueryParams>,
) -> Result<Json<StatsResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let filter = StatsFilter::new(offset, limit)
        .with_date_range(params.date_filter.from, params.date_filter.to);

    let detailed = state.stats_service.get_detailed_stats(id, filter).await?;

    Ok(Json(StatsResponse {
        pagination: PaginationMeta::new(&params.pagination, detailed.total),
        link_id: detailed.link.id,
        video_id: detailed.link.video_id,
        pretty_slug: detailed.link.pretty_slug,
        destination_url: detailed.link.destination_url,
        created_at: detailed.link.created_at,
        total: detailed.total,
        items: detailed.items.into_iter().map(ClickInfo::from).collect(),
    }))
}

/// Retrieves aggregated click totals for all links.
///
/// # Endpoint
///
/// `GET /api/stats?video_id=&page=&page_size=&from=&to=`
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn stats_list_handler(
    State(state): State<AppState>,
    Query(params): Query<StatsQueryParams>,
) -> Result<Json<StatsListResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let filter = StatsFilter::new(offset, limit)
        .with_video(params.video_id.clone())
        .with_date_range(params.date_filter.from, params.date_filter.to);

    let stats = state.stats_service.get_all_stats(filter).await?;
    let total_links = state
        .link_service
        .count_links(params.video_id.as_deref())
        .await?;

    Ok(Json(StatsListResponse {
        pagination: PaginationMeta::new(&params.pagination, total_links),
        items: stats
            .into_iter()
            .map(|s| LinkStatsItem {
                link_id: s.link_id,
                video_id: s.video_id,
                pretty_slug: s.pretty_slug,
                destination_url: s.destination_url,
                total: s.total,
                created_at: s.created_at,
            })
            .collect(),
    }))
}

/// Groups a link's clicks by country.
///
/// # Endpoint
///
/// `GET /api/stats/{id}/countries?from=&to=`
///
/// Clicks persisted without geo enrichment are grouped under `null`.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown link id.
pub async fn country_stats_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DateFilterParams>,
) -> Result<Json<CountryBreakdownResponse>, AppError> {
    // Distinguish an unknown link from a link with no clicks.
    let link = state.link_service.get_link(id).await?;

    let breakdown = state
        .stats_service
        .country_breakdown(link.id, params.from, params.to)
        .await?;

    Ok(Json(CountryBreakdownResponse {
        link_id: link.id,
        items: breakdown
            .into_iter()
            .map(|c| CountryCountItem {
                country: c.country,
                total: c.total,
            })
            .collect(),
    }))
}
