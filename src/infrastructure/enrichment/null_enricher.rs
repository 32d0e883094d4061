//! No-op enricher for testing or disabled enrichment.

use async_trait::async_trait;

use crate::domain::enrichment::{Enricher, Enrichment};

/// An enricher that derives nothing.
///
/// Clicks recorded through it keep their raw capture but carry no
/// country/device/browser fields.
pub struct NullEnricher;

#[async_trait]
impl Enricher for NullEnricher {
    async fn enrich(&self, _ip_address: Option<&str>, _user_agent: Option<&str>) -> Enrichment {
        Enrichment::default()
    }
}
