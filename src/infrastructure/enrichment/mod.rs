//! Click enrichment implementations.
//!
//! Implements [`crate::domain::enrichment::Enricher`]:
//!
//! - [`VisitEnricher`] - GeoIP country lookup + user-agent parsing
//! - [`NullEnricher`] - No-op for tests and enrichment-less deployments

pub mod geoip;
pub mod null_enricher;
pub mod service;
pub mod user_agent;

pub use null_enricher::NullEnricher;
pub use service::VisitEnricher;
