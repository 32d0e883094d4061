//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Click;

/// Individual click event information.
///
/// Optional fields are omitted from JSON when `None` for cleaner responses;
/// enrichment fields are absent for clicks persisted without enrichment.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub clicked_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            clicked_at: click.clicked_at,
            user_agent: click.user_agent,
            referrer: click.referrer,
            ip_address: click.ip_address,
            country: click.country,
            device_type: click.device_type,
            browser: click.browser,
        }
    }
}
