//! Tracking link entity and UTM parameter set.

use chrono::{DateTime, Utc};

/// Default UTM source applied when the creator supplies no override.
pub const DEFAULT_UTM_SOURCE: &str = "youtube";

/// Default UTM medium applied when the creator supplies no override.
pub const DEFAULT_UTM_MEDIUM: &str = "video";

/// The UTM parameter set carried by a tracking link.
///
/// `source` and `medium` are always present (defaulted); `campaign` is
/// required and conventionally equals the video id; `content` and `term`
/// are optional extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtmParams {
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub content: Option<String>,
    pub term: Option<String>,
}

impl UtmParams {
    /// Resolves the UTM parameter set for a video, applying defaults for
    /// absent overrides. The campaign falls back to the video id.
    pub fn for_video(
        video_id: &str,
        source: Option<String>,
        medium: Option<String>,
        campaign: Option<String>,
        content: Option<String>,
        term: Option<String>,
    ) -> Self {
        Self {
            source: source.unwrap_or_else(|| DEFAULT_UTM_SOURCE.to_string()),
            medium: medium.unwrap_or_else(|| DEFAULT_UTM_MEDIUM.to_string()),
            campaign: campaign.unwrap_or_else(|| video_id.to_string()),
            content,
            term,
        }
    }
}

/// A UTM tracking link associated with a video.
///
/// The video association is by value only (`video_id` string, no referential
/// constraint), so links can be minted for videos not yet in any catalog.
/// `tracking_url` is computed once at creation and stored, never recomputed
/// on read.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackingLink {
    pub id: i64,
    pub video_id: String,
    pub destination_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_content: Option<String>,
    pub utm_term: Option<String>,
    pub tracking_url: String,
    pub pretty_slug: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for persisting a new tracking link.
///
/// `tracking_url` is already computed by the caller; `pretty_slug` is `None`
/// for links created without a short alias.
#[derive(Debug, Clone)]
pub struct NewTrackingLink {
    pub video_id: String,
    pub destination_url: String,
    pub utm: UtmParams,
    pub tracking_url: String,
    pub pretty_slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_defaults() {
        let utm = UtmParams::for_video("abc123", None, None, None, None, None);

        assert_eq!(utm.source, "youtube");
        assert_eq!(utm.medium, "video");
        assert_eq!(utm.campaign, "abc123");
        assert!(utm.content.is_none());
        assert!(utm.term.is_none());
    }

    #[test]
    fn test_utm_overrides_win() {
        let utm = UtmParams::for_video(
            "abc123",
            Some("newsletter".to_string()),
            Some("email".to_string()),
            Some("spring-launch".to_string()),
            Some("footer".to_string()),
            None,
        );

        assert_eq!(utm.source, "newsletter");
        assert_eq!(utm.medium, "email");
        assert_eq!(utm.campaign, "spring-launch");
        assert_eq!(utm.content, Some("footer".to_string()));
    }

    #[test]
    fn test_new_link_without_slug() {
        let new_link = NewTrackingLink {
            video_id: "xyz789".to_string(),
            destination_url: "https://example.com".to_string(),
            utm: UtmParams::for_video("xyz789", None, None, None, None, None),
            tracking_url: "https://example.com?utm_source=youtube".to_string(),
            pretty_slug: None,
        };

        assert_eq!(new_link.video_id, "xyz789");
        assert!(new_link.pretty_slug.is_none());
    }
}
