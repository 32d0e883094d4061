//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewTrackingLink, TrackingLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_slug;

/// PostgreSQL repository for tracking-link storage and retrieval.
///
/// Slug reservation is optimistic: the INSERT/UPDATE is attempted and the
/// partial unique index on `pretty_slug` is the final arbiter. A violation
/// surfaces as [`AppError::Conflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewTrackingLink) -> Result<TrackingLink, AppError> {
        let result = sqlx::query_as::<_, TrackingLink>(
            r#"
            INSERT INTO tracking_links
                (video_id, destination_url, utm_source, utm_medium, utm_campaign,
                 utm_content, utm_term, tracking_url, pretty_slug)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&new_link.video_id)
        .bind(&new_link.destination_url)
        .bind(&new_link.utm.source)
        .bind(&new_link.utm.medium)
        .bind(&new_link.utm.campaign)
        .bind(&new_link.utm.content)
        .bind(&new_link.utm.term)
        .bind(&new_link.tracking_url)
        .bind(&new_link.pretty_slug)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(link) => Ok(link),
            Err(e) if is_unique_violation_on_slug(&e) => Err(AppError::conflict(
                "Pretty slug already taken",
                json!({ "slug": new_link.pretty_slug }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TrackingLink>, AppError> {
        let link = sqlx::query_as::<_, TrackingLink>(
            "SELECT * FROM tracking_links WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_active_by_slug(&self, slug: &str) -> Result<Option<TrackingLink>, AppError> {
        let link = sqlx::query_as::<_, TrackingLink>(
            "SELECT * FROM tracking_links WHERE pretty_slug = $1 AND is_active",
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list<'a>(
        &self,
        video_id: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TrackingLink>, AppError> {
        let links = sqlx::query_as::<_, TrackingLink>(
            r#"
            SELECT * FROM tracking_links
            WHERE ($1::text IS NULL OR video_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(video_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn count<'a>(&self, video_id: Option<&'a str>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tracking_links WHERE ($1::text IS NULL OR video_id = $1)",
        )
        .bind(video_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn deactivate(&self, id: i64) -> Result<Option<TrackingLink>, AppError> {
        let link = sqlx::query_as::<_, TrackingLink>(
            r#"
            UPDATE tracking_links
            SET is_active = FALSE, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn update_slug(&self, id: i64, slug: &str) -> Result<Option<TrackingLink>, AppError> {
        let result = sqlx::query_as::<_, TrackingLink>(
            r#"
            UPDATE tracking_links
            SET pretty_slug = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await;

        match result {
            Ok(link) => Ok(link),
            Err(e) if is_unique_violation_on_slug(&e) => Err(AppError::conflict(
                "Pretty slug already taken",
                json!({ "slug": slug }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> Result<Option<TrackingLink>, AppError> {
        // Click rows go with the link via ON DELETE CASCADE.
        let link = sqlx::query_as::<_, TrackingLink>(
            "DELETE FROM tracking_links WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }
}
