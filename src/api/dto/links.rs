//! DTOs for tracking-link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use super::pagination::PaginationMeta;
use crate::domain::entities::TrackingLink;

/// Compiled regex for pretty slug candidates.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Request to create a tracking link.
///
/// UTM fields are optional overrides: source defaults to `youtube`, medium
/// to `video`, campaign to the video id. `pretty_slug` reserves a
/// caller-chosen slug; `slug: false` skips slug allocation entirely.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Video this link is attributed to; free text, unknown videos allowed.
    #[validate(length(min = 1, max = 255))]
    pub video_id: String,

    /// Absolute URL the visitor is ultimately sent to.
    #[validate(url(message = "Invalid URL format"))]
    pub destination_url: String,

    #[validate(length(max = 100))]
    pub utm_source: Option<String>,

    #[validate(length(max = 100))]
    pub utm_medium: Option<String>,

    #[validate(length(max = 255))]
    pub utm_campaign: Option<String>,

    #[validate(length(max = 255))]
    pub utm_content: Option<String>,

    #[validate(length(max = 255))]
    pub utm_term: Option<String>,

    /// Optional caller-chosen slug (validated for length and characters).
    #[validate(length(min = 4, max = 50))]
    #[validate(regex(path = "*SLUG_REGEX"))]
    pub pretty_slug: Option<String>,

    /// When false, the link is created without any pretty slug.
    /// Ignored when `pretty_slug` is supplied.
    #[serde(default = "default_true")]
    pub slug: bool,
}

fn default_true() -> bool {
    true
}

/// JSON representation of a tracking link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub video_id: String,
    pub destination_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,

    pub tracking_url: String,
    pub pretty_slug: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TrackingLink> for LinkResponse {
    fn from(link: TrackingLink) -> Self {
        Self {
            id: link.id,
            video_id: link.video_id,
            destination_url: link.destination_url,
            utm_source: link.utm_source,
            utm_medium: link.utm_medium,
            utm_campaign: link.utm_campaign,
            utm_content: link.utm_content,
            utm_term: link.utm_term,
            tracking_url: link.tracking_url,
            pretty_slug: link.pretty_slug,
            is_active: link.is_active,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Paginated list of tracking links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkResponse>,
}
