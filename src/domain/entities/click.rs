//! Click entity representing a single recorded visit.

use chrono::{DateTime, Utc};

/// A click event recorded when a tracking link is resolved.
///
/// Captures the raw request context (user agent, IP, referrer) plus the
/// enrichment output (country, device type, browser). Enrichment fields are
/// absent when enrichment failed or was skipped; the raw capture is kept
/// either way. Rows are append-only and never mutated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
}

/// Input data for appending a new click event.
///
/// `clicked_at` is assigned by the recorder at ingestion time, never supplied
/// by the visitor, so click history cannot be forged.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_click_minimal() {
        let new_click = NewClick {
            link_id: 10,
            clicked_at: Utc::now(),
            user_agent: None,
            ip_address: None,
            referrer: None,
            country: None,
            device_type: None,
            browser: None,
        };

        assert_eq!(new_click.link_id, 10);
        assert!(new_click.user_agent.is_none());
        assert!(new_click.country.is_none());
    }

    #[test]
    fn test_new_click_with_enrichment() {
        let new_click = NewClick {
            link_id: 42,
            clicked_at: Utc::now(),
            user_agent: Some("Mozilla/5.0".to_string()),
            ip_address: Some("192.168.1.1".to_string()),
            referrer: Some("https://news.ycombinator.com".to_string()),
            country: Some("DE".to_string()),
            device_type: Some("desktop".to_string()),
            browser: Some("Firefox".to_string()),
        };

        assert_eq!(new_click.country, Some("DE".to_string()));
        assert_eq!(new_click.device_type, Some("desktop".to_string()));
        assert_eq!(new_click.browser, Some("Firefox".to_string()));
    }
}
