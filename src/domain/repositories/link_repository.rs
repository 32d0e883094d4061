//! Repository trait for tracking-link data access.

use crate::domain::entities::{NewTrackingLink, TrackingLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing tracking links.
///
/// The persistence layer enforces slug uniqueness with a partial unique
/// index; repository callers treat a unique violation as the authoritative
/// collision signal (optimistic reservation, no pre-locking).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new tracking link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the pretty slug is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewTrackingLink) -> Result<TrackingLink, AppError>;

    /// Finds a link by its id, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<TrackingLink>, AppError>;

    /// Finds an active link by its pretty slug.
    ///
    /// Inactive and unknown slugs both return `Ok(None)`; callers cannot
    /// distinguish a deactivated link from one that never existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_slug(&self, slug: &str) -> Result<Option<TrackingLink>, AppError>;

    /// Lists links newest-first, optionally filtered by video id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list<'a>(
        &self,
        video_id: Option<&'a str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TrackingLink>, AppError>;

    /// Counts links, optionally filtered by video id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count<'a>(&self, video_id: Option<&'a str>) -> Result<i64, AppError>;

    /// Deactivates a link; its slug stops resolving.
    ///
    /// Returns the updated row, or `Ok(None)` if the link is unknown.
    /// Idempotent: deactivating an already-inactive link succeeds and still
    /// advances `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn deactivate(&self, id: i64) -> Result<Option<TrackingLink>, AppError>;

    /// Replaces the pretty slug of an existing link.
    ///
    /// Returns `Ok(None)` if the link is unknown. Advances `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new slug is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_slug(&self, id: i64, slug: &str) -> Result<Option<TrackingLink>, AppError>;

    /// Hard-deletes a link; its click events are removed by cascade.
    ///
    /// Returns the deleted row, or `Ok(None)` if the link is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<Option<TrackingLink>, AppError>;
}
