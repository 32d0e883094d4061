//! DTOs for link statistics endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use super::pagination::PaginationMeta;

/// Detailed statistics for a specific tracking link.
///
/// Includes link metadata, total click count, and paginated click records.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub pagination: PaginationMeta,
    pub link_id: i64,
    pub video_id: String,
    pub pretty_slug: Option<String>,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
    pub total: i64,
    pub items: Vec<ClickInfo>,
}

/// Paginated list of per-link click totals.
#[derive(Debug, Serialize)]
pub struct StatsListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkStatsItem>,
}

/// Aggregated totals for a single link.
#[derive(Debug, Serialize)]
pub struct LinkStatsItem {
    pub link_id: i64,
    pub video_id: String,
    pub pretty_slug: Option<String>,
    pub destination_url: String,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}

/// Clicks grouped by country for a single link.
#[derive(Debug, Serialize)]
pub struct CountryBreakdownResponse {
    pub link_id: i64,
    pub items: Vec<CountryCountItem>,
}

/// Click total for one country; `country` is `null` for unenriched clicks.
#[derive(Debug, Serialize)]
pub struct CountryCountItem {
    pub country: Option<String>,
    pub total: i64,
}
