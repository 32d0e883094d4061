//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick, TrackingLink};
use crate::domain::repositories::{
    ClickRepository, CountryCount, DetailedStats, LinkStats, StatsFilter,
};
use crate::error::AppError;

/// PostgreSQL repository for click ingestion and analytics.
///
/// Click rows are append-only. Analytics queries lean on the
/// `(link_id, clicked_at)`, `(clicked_at)`, and `(country)` indexes.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let result = sqlx::query_as::<_, Click>(
            r#"
            INSERT INTO link_clicks
                (link_id, clicked_at, user_agent, ip_address, referrer,
                 country, device_type, browser)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.clicked_at)
        .bind(&new_click.user_agent)
        .bind(&new_click.ip_address)
        .bind(&new_click.referrer)
        .bind(&new_click.country)
        .bind(&new_click.device_type)
        .bind(&new_click.browser)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(click) => Ok(click),
            Err(e)
                if e.as_database_error()
                    .is_some_and(|db| db.is_foreign_key_violation()) =>
            {
                Err(AppError::bad_request(
                    "Link does not exist",
                    json!({ "link_id": new_click.link_id }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_stats_by_link_id(
        &self,
        link_id: i64,
        filter: StatsFilter,
    ) -> Result<Option<DetailedStats>, AppError> {
        let link = sqlx::query_as::<_, TrackingLink>(
            "SELECT * FROM tracking_links WHERE id = $1",
        )
        .bind(link_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(link) = link else {
            return Ok(None);
        };

        let total = self
            .count_clicks_by_link_id(link.id, filter.from_date, filter.to_date)
            .await?;

        let items = sqlx::query_as::<_, Click>(
            r#"
            SELECT * FROM link_clicks
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR clicked_at >= $2)
              AND ($3::timestamptz IS NULL OR clicked_at <= $3)
            ORDER BY clicked_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(link.id)
        .bind(filter.from_date)
        .bind(filter.to_date)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(Some(DetailedStats { link, total, items }))
    }

    async fn get_all_stats(&self, filter: StatsFilter) -> Result<Vec<LinkStats>, AppError> {
        let stats = sqlx::query_as::<_, LinkStats>(
            r#"
            SELECT
                l.id AS link_id,
                l.video_id,
                l.pretty_slug,
                l.destination_url,
                COUNT(c.id) AS total,
                l.created_at
            FROM tracking_links l
            LEFT JOIN link_clicks c ON c.link_id = l.id
                AND ($1::timestamptz IS NULL OR c.clicked_at >= $1)
                AND ($2::timestamptz IS NULL OR c.clicked_at <= $2)
            WHERE ($3::text IS NULL OR l.video_id = $3)
            GROUP BY l.id
            ORDER BY l.created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.from_date)
        .bind(filter.to_date)
        .bind(&filter.video_id)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(stats)
    }

    async fn count_clicks_by_link_id(
        &self,
        link_id: i64,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM link_clicks
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR clicked_at >= $2)
              AND ($3::timestamptz IS NULL OR clicked_at <= $3)
            "#,
        )
        .bind(link_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn country_breakdown(
        &self,
        link_id: i64,
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<CountryCount>, AppError> {
        let breakdown = sqlx::query_as::<_, CountryCount>(
            r#"
            SELECT country, COUNT(*) AS total
            FROM link_clicks
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR clicked_at >= $2)
              AND ($3::timestamptz IS NULL OR clicked_at <= $3)
            GROUP BY country
            ORDER BY total DESC, country ASC NULLS LAST
            "#,
        )
        .bind(link_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(breakdown)
    }
}
