//! Repository trait for click ingestion and analytics.

use crate::domain::entities::{Click, NewClick, TrackingLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Aggregated click totals for a single link.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LinkStats {
    pub link_id: i64,
    pub video_id: String,
    pub pretty_slug: Option<String>,
    pub destination_url: String,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}

/// Detailed statistics with individual click records.
#[derive(Debug, Clone)]
pub struct DetailedStats {
    pub link: TrackingLink,
    pub total: i64,
    pub items: Vec<Click>,
}

/// Click totals for one country.
///
/// `country` is `None` for clicks that were persisted without geo enrichment.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CountryCount {
    pub country: Option<String>,
    pub total: i64,
}

/// Filter criteria for analytics queries.
#[derive(Debug, Clone)]
pub struct StatsFilter {
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub offset: i64,
    pub limit: i64,
    pub video_id: Option<String>,
}

impl StatsFilter {
    /// Creates a new filter with pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            from_date: None,
            to_date: None,
            offset,
            limit,
            video_id: None,
        }
    }

    /// Adds video filtering to the query.
    pub fn with_video(mut self, video_id: Option<String>) -> Self {
        self.video_id = video_id;
        self
    }

    /// Adds date range filtering to the query.
    pub fn with_date_range(
        mut self,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }
}

/// Repository interface for click recording and statistics.
///
/// Recording is append-only; analytics queries are sized for range scans by
/// link+date, by date, and by country.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_click.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Retrieves detailed statistics for a specific link.
    ///
    /// Includes individual click records with pagination and optional date
    /// filtering.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(DetailedStats))` if the link exists
    /// - `Ok(None)` if the link is not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_stats_by_link_id(
        &self,
        link_id: i64,
        filter: StatsFilter,
    ) -> Result<Option<DetailedStats>, AppError>;

    /// Retrieves aggregated per-link click totals.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_all_stats(&self, filter: StatsFilter) -> Result<Vec<LinkStats>, AppError>;

    /// Counts clicks for a link within an optional date range.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_clicks_by_link_id(
        &self,
        link_id: i64,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError>;

    /// Groups a link's clicks by country within an optional date range.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn country_breakdown(
        &self,
        link_id: i64,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<CountryCount>, AppError>;
}
