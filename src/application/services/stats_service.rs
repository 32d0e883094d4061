//! Click statistics and analytics service.

use std::sync::Arc;

use crate::domain::repositories::{
    ClickRepository, CountryCount, DetailedStats, LinkStats, StatsFilter,
};
use crate::error::AppError;
use serde_json::json;

/// Service for retrieving click statistics and analytics.
///
/// Provides aggregated per-link totals, detailed click records with date
/// filtering and pagination, and country breakdowns.
pub struct StatsService<C: ClickRepository> {
    clicks: Arc<C>,
}

impl<C: ClickRepository> StatsService<C> {
    /// Creates a new statistics service.
    pub fn new(clicks: Arc<C>) -> Self {
        Self { clicks }
    }

    /// Retrieves detailed statistics for a specific link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the id.
    pub async fn get_detailed_stats(
        &self,
        link_id: i64,
        filter: StatsFilter,
    ) -> Result<DetailedStats, AppError> {
        self.clicks
            .get_stats_by_link_id(link_id, filter)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Statistics not found", json!({ "link_id": link_id }))
            })
    }

    /// Retrieves aggregated per-link click totals.
    pub async fn get_all_stats(&self, filter: StatsFilter) -> Result<Vec<LinkStats>, AppError> {
        self.clicks.get_all_stats(filter).await
    }

    /// Groups a link's clicks by country within an optional date range.
    pub async fn country_breakdown(
        &self,
        link_id: i64,
        from_date: Option<chrono::DateTime<chrono::Utc>>,
        to_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Vec<CountryCount>, AppError> {
        self.clicks
            .country_breakdown(link_id, from_date, to_date)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TrackingLink;
    use crate::domain::repositories::MockClickRepository;
    use chrono::Utc;

    fn test_link(id: i64) -> TrackingLink {
        TrackingLink {
            id,
            video_id: "abc123".to_string(),
            destination_url: "https://example.com".to_string(),
            utm_source: "youtube".to_string(),
            utm_medium: "video".to_string(),
            utm_campaign: "abc123".to_string(),
            utm_content: None,
            utm_term: None,
            tracking_url: "https://example.com?utm_source=youtube".to_string(),
            pretty_slug: Some("promo".to_string()),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_detailed_stats_success() {
        let mut repo = MockClickRepository::new();

        let stats = DetailedStats {
            link: test_link(1),
            total: 5,
            items: vec![],
        };

        repo.expect_get_stats_by_link_id()
            .withf(|link_id, _| *link_id == 1)
            .times(1)
            .returning(move |_, _| Ok(Some(stats.clone())));

        let service = StatsService::new(Arc::new(repo));

        let result = service
            .get_detailed_stats(1, StatsFilter::new(0, 10))
            .await
            .unwrap();

        assert_eq!(result.total, 5);
        assert_eq!(result.link.id, 1);
    }

    #[tokio::test]
    async fn test_get_detailed_stats_not_found() {
        let mut repo = MockClickRepository::new();
        repo.expect_get_stats_by_link_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = StatsService::new(Arc::new(repo));

        let result = service.get_detailed_stats(99, StatsFilter::new(0, 10)).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_all_stats() {
        let mut repo = MockClickRepository::new();

        let items = vec![
            LinkStats {
                link_id: 1,
                video_id: "abc123".to_string(),
                pretty_slug: Some("promo".to_string()),
                destination_url: "https://example.com".to_string(),
                total: 10,
                created_at: Utc::now(),
            },
            LinkStats {
                link_id: 2,
                video_id: "xyz789".to_string(),
                pretty_slug: None,
                destination_url: "https://test.com".to_string(),
                total: 5,
                created_at: Utc::now(),
            },
        ];

        repo.expect_get_all_stats()
            .times(1)
            .returning(move |_| Ok(items.clone()));

        let service = StatsService::new(Arc::new(repo));

        let stats = service.get_all_stats(StatsFilter::new(0, 10)).await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].total, 10);
    }

    #[tokio::test]
    async fn test_country_breakdown() {
        let mut repo = MockClickRepository::new();

        repo.expect_country_breakdown()
            .withf(|link_id, _, _| *link_id == 1)
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    CountryCount {
                        country: Some("US".to_string()),
                        total: 7,
                    },
                    CountryCount {
                        country: None,
                        total: 2,
                    },
                ])
            });

        let service = StatsService::new(Arc::new(repo));

        let breakdown = service.country_breakdown(1, None, None).await.unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].country, Some("US".to_string()));
        assert_eq!(breakdown[1].total, 2);
    }
}
