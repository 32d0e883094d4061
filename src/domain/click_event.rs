//! Click event model for asynchronous click ingestion.

use chrono::{DateTime, Utc};

/// An in-memory click event passed from the redirect handler to the
/// background worker via a bounded channel.
///
/// The handler resolves the link before enqueueing, so the event carries the
/// link id directly and the worker needs no further lookups. `clicked_at` is
/// stamped when the event is captured, at redirect time; visitors never
/// supply it.
///
/// # Usage Flow
///
/// 1. Captured in the redirect handler with request metadata
/// 2. Sent to the channel (non-blocking; a full queue drops the event)
/// 3. Enriched and persisted by [`crate::domain::click_worker::run_click_worker`]
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub ip_address: Option<String>,
}

impl ClickEvent {
    /// Captures a click event for a resolved link, stamping the ingestion
    /// timestamp.
    pub fn capture(
        link_id: i64,
        ip_address: Option<String>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            clicked_at: Utc::now(),
            ip_address,
            user_agent: user_agent.map(|s| s.to_string()),
            referrer: referrer.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_full() {
        let event = ClickEvent::capture(
            42,
            Some("192.168.1.1".to_string()),
            Some("Mozilla/5.0"),
            Some("https://news.ycombinator.com"),
        );

        assert_eq!(event.link_id, 42);
        assert_eq!(event.ip_address, Some("192.168.1.1".to_string()));
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(
            event.referrer,
            Some("https://news.ycombinator.com".to_string())
        );
    }

    #[test]
    fn test_capture_minimal() {
        let event = ClickEvent::capture(7, None, None, None);

        assert_eq!(event.link_id, 7);
        assert!(event.ip_address.is_none());
        assert!(event.user_agent.is_none());
        assert!(event.referrer.is_none());
    }

    #[test]
    fn test_capture_stamps_timestamp() {
        let before = Utc::now();
        let event = ClickEvent::capture(1, None, None, None);
        let after = Utc::now();

        assert!(event.clicked_at >= before);
        assert!(event.clicked_at <= after);
    }
}
