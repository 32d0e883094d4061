//! Combined enrichment service.

use async_trait::async_trait;
use tracing::{info, warn};

use super::geoip::GeoIpResolver;
use super::user_agent::parse_user_agent;
use crate::domain::enrichment::{Enricher, Enrichment};

/// Production enricher combining GeoIP country lookup and user-agent parsing.
///
/// The GeoIP database is optional: when no database is configured (or it
/// fails to load at startup), country enrichment is skipped and only the
/// user-agent fields are derived. Both derivations are local, so the only
/// latency bound needed is the worker-side timeout.
pub struct VisitEnricher {
    geo: Option<GeoIpResolver>,
}

impl VisitEnricher {
    /// Builds an enricher, loading the GeoIP database when a path is given.
    ///
    /// A database that fails to load degrades to geo-less enrichment with a
    /// warning instead of refusing to start.
    pub fn new(geoip_db_path: Option<&str>) -> Self {
        let geo = match geoip_db_path {
            Some(path) => match GeoIpResolver::open(path) {
                Ok(resolver) => {
                    info!("GeoIP enrichment enabled ({})", path);
                    Some(resolver)
                }
                Err(e) => {
                    warn!(
                        "Failed to load GeoIP database at {}: {}. Country enrichment disabled.",
                        path, e
                    );
                    None
                }
            },
            None => {
                info!("GeoIP enrichment disabled (no database configured)");
                None
            }
        };

        Self { geo }
    }
}

#[async_trait]
impl Enricher for VisitEnricher {
    async fn enrich(&self, ip_address: Option<&str>, user_agent: Option<&str>) -> Enrichment {
        let country = match (&self.geo, ip_address) {
            (Some(geo), Some(ip)) => geo.country(ip),
            _ => None,
        };

        let parsed = user_agent.map(parse_user_agent).unwrap_or_default();

        Enrichment {
            country,
            device_type: parsed.device_type,
            browser: parsed.browser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enrich_without_geo_database() {
        let enricher = VisitEnricher::new(None);

        let enrichment = enricher
            .enrich(
                Some("8.8.8.8"),
                Some(
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
                ),
            )
            .await;

        assert!(enrichment.country.is_none());
        assert_eq!(enrichment.device_type, Some("desktop".to_string()));
        assert_eq!(enrichment.browser, Some("Chrome".to_string()));
    }

    #[tokio::test]
    async fn test_enrich_with_no_context() {
        let enricher = VisitEnricher::new(None);

        let enrichment = enricher.enrich(None, None).await;

        assert_eq!(enrichment, Enrichment::default());
    }

    #[tokio::test]
    async fn test_missing_database_file_degrades() {
        let enricher = VisitEnricher::new(Some("/nonexistent/GeoLite2-Country.mmdb"));

        let enrichment = enricher.enrich(Some("8.8.8.8"), None).await;

        assert!(enrichment.country.is_none());
    }
}
