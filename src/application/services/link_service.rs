//! Tracking-link creation and management service.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::entities::{NewTrackingLink, TrackingLink, UtmParams};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::{generate_slug, validate_slug_candidate};
use crate::utils::tracking_url::build_tracking_url;

/// Attempts at generating a free slug before giving up.
const MAX_SLUG_ATTEMPTS: usize = 5;

/// Input for creating a tracking link.
///
/// UTM overrides default to `youtube`/`video`, and the campaign falls back
/// to the video id. `slug_candidate` reserves a caller-chosen slug verbatim;
/// with `allocate_slug = true` and no candidate, a random slug is generated.
#[derive(Debug, Clone)]
pub struct CreateLinkCommand {
    pub video_id: String,
    pub destination_url: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub slug_candidate: Option<String>,
    pub allocate_slug: bool,
}

/// Service for creating and managing tracking links.
///
/// Composes the tracking URL, allocates the pretty slug, and delegates
/// persistence. Slug reservation is optimistic: the storage layer's unique
/// constraint is the arbiter, and a violation is interpreted as the conflict
/// outcome rather than pre-locking.
pub struct LinkService<L: LinkRepository> {
    links: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(links: Arc<L>) -> Self {
        Self { links }
    }

    /// Creates a tracking link.
    ///
    /// The tracking URL is computed here, once, and stored with the record.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] — empty video id, invalid destination URL,
    ///   or malformed slug candidate
    /// - [`AppError::Conflict`] — the caller-chosen slug is already taken;
    ///   the candidate is never silently rewritten
    /// - [`AppError::ResourceExhausted`] — generated-slug attempts exhausted
    pub async fn create_tracking_link(
        &self,
        cmd: CreateLinkCommand,
    ) -> Result<TrackingLink, AppError> {
        if cmd.video_id.trim().is_empty() {
            return Err(AppError::bad_request("Video id must not be empty", json!({})));
        }

        let utm = UtmParams::for_video(
            &cmd.video_id,
            cmd.utm_source,
            cmd.utm_medium,
            cmd.utm_campaign,
            cmd.utm_content,
            cmd.utm_term,
        );

        let tracking_url = build_tracking_url(&cmd.destination_url, &utm).map_err(|e| {
            AppError::bad_request(
                "Invalid destination URL",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let new_link = NewTrackingLink {
            video_id: cmd.video_id,
            destination_url: cmd.destination_url,
            utm,
            tracking_url,
            pretty_slug: None,
        };

        if let Some(candidate) = cmd.slug_candidate {
            validate_slug_candidate(&candidate)?;

            return self
                .links
                .create(NewTrackingLink {
                    pretty_slug: Some(candidate),
                    ..new_link
                })
                .await;
        }

        if !cmd.allocate_slug {
            return self.links.create(new_link).await;
        }

        self.create_with_generated_slug(new_link).await
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the id.
    pub async fn get_link(&self, id: i64) -> Result<TrackingLink, AppError> {
        self.links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tracking link not found", json!({ "id": id })))
    }

    /// Lists links newest-first, optionally filtered by video id.
    pub async fn list_links(
        &self,
        video_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TrackingLink>, AppError> {
        self.links.list(video_id, offset, limit).await
    }

    /// Counts links, optionally filtered by video id.
    pub async fn count_links(&self, video_id: Option<&str>) -> Result<i64, AppError> {
        self.links.count(video_id).await
    }

    /// Deactivates a link so its slug stops resolving. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the id.
    pub async fn deactivate_link(&self, id: i64) -> Result<TrackingLink, AppError> {
        self.links
            .deactivate(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tracking link not found", json!({ "id": id })))
    }

    /// Replaces a link's pretty slug with a freshly generated one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and
    /// [`AppError::ResourceExhausted`] when generation attempts run out.
    pub async fn regenerate_slug(&self, id: i64) -> Result<TrackingLink, AppError> {
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = generate_slug();

            match self.links.update_slug(id, &slug).await {
                Ok(Some(link)) => return Ok(link),
                Ok(None) => {
                    return Err(AppError::not_found(
                        "Tracking link not found",
                        json!({ "id": id }),
                    ));
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(id, attempt, "Generated slug collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::resource_exhausted(
            "Failed to allocate a unique slug",
            json!({ "attempts": MAX_SLUG_ATTEMPTS }),
        ))
    }

    /// Hard-deletes a link and, by cascade, all of its click events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the id.
    pub async fn delete_link(&self, id: i64) -> Result<TrackingLink, AppError> {
        self.links
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tracking link not found", json!({ "id": id })))
    }

    /// Persists a link under a generated slug, retrying on collision.
    ///
    /// The create itself is the reservation: two racing creations of the
    /// same token resolve at the unique index, and the loser just draws a
    /// new token.
    async fn create_with_generated_slug(
        &self,
        new_link: NewTrackingLink,
    ) -> Result<TrackingLink, AppError> {
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = generate_slug();

            let candidate = NewTrackingLink {
                pretty_slug: Some(slug),
                ..new_link.clone()
            };

            match self.links.create(candidate).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, "Generated slug collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::resource_exhausted(
            "Failed to allocate a unique slug",
            json!({ "attempts": MAX_SLUG_ATTEMPTS }),
        ))
    }
}
