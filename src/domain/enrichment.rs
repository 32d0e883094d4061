//! Enrichment capability boundary for click events.

use async_trait::async_trait;

/// Derived visit context produced by enrichment.
///
/// Every field is optional: a lookup miss, malformed input, or an unavailable
/// backend leaves the corresponding field empty. Enrichment output never
/// decides whether a click is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// ISO 3166-1 alpha-2 country code derived from the IP address.
    pub country: Option<String>,
    /// Coarse device class derived from the user agent (desktop, mobile, ...).
    pub device_type: Option<String>,
    /// Browser family derived from the user agent.
    pub browser: Option<String>,
}

/// Best-effort derivation of country/device/browser from raw request
/// metadata.
///
/// Implementations must be infallible from the caller's perspective: failures
/// are logged internally and surface only as empty [`Enrichment`] fields.
/// Callers bound latency externally (see the click worker's enrichment
/// timeout).
///
/// # Implementations
///
/// - [`crate::infrastructure::enrichment::VisitEnricher`] - GeoIP + user-agent parsing
/// - [`crate::infrastructure::enrichment::NullEnricher`] - No-op for disabled enrichment
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Derives enrichment fields from an IP address and user-agent string.
    async fn enrich(&self, ip_address: Option<&str>, user_agent: Option<&str>) -> Enrichment;
}
