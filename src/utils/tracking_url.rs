//! Tracking URL composition.
//!
//! Builds the canonical tracking URL for a link by appending UTM query
//! parameters to the destination URL.

use url::Url;

use crate::domain::entities::UtmParams;

/// Errors that can occur while building a tracking URL.
#[derive(Debug, thiserror::Error)]
pub enum TrackingUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Query parameter names owned by the UTM set.
const UTM_KEYS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
];

/// Builds the tracking URL for a destination and UTM parameter set.
///
/// Pre-existing query parameters on the destination are preserved, except
/// same-named UTM parameters, which are replaced — the link is explicitly a
/// UTM-tracking link, so its UTM values win.
///
/// Pure and deterministic: building from its own output yields the same URL.
///
/// # Errors
///
/// Returns [`TrackingUrlError::InvalidFormat`] if the destination does not
/// parse as an absolute URL, and [`TrackingUrlError::UnsupportedProtocol`]
/// for non-HTTP(S) schemes (`javascript:`, `data:`, `file:`, ...).
///
/// # Examples
///
/// ```ignore
/// let utm = UtmParams::for_video("abc123", None, None, None, None, None);
/// assert_eq!(
///     build_tracking_url("https://example.com/page", &utm).unwrap(),
///     "https://example.com/page?utm_source=youtube&utm_medium=video&utm_campaign=abc123"
/// );
/// ```
pub fn build_tracking_url(
    destination_url: &str,
    utm: &UtmParams,
) -> Result<String, TrackingUrlError> {
    let mut url = Url::parse(destination_url)
        .map_err(|e| TrackingUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TrackingUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none() {
        return Err(TrackingUrlError::InvalidFormat(
            "URL has no host".to_string(),
        ));
    }

    let existing: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !UTM_KEYS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();

        for (key, value) in &existing {
            pairs.append_pair(key, value);
        }

        pairs.append_pair("utm_source", &utm.source);
        pairs.append_pair("utm_medium", &utm.medium);
        pairs.append_pair("utm_campaign", &utm.campaign);

        if let Some(content) = &utm.content {
            pairs.append_pair("utm_content", content);
        }
        if let Some(term) = &utm.term {
            pairs.append_pair("utm_term", term);
        }
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn utm(campaign: &str) -> UtmParams {
        UtmParams {
            source: "youtube".to_string(),
            medium: "video".to_string(),
            campaign: campaign.to_string(),
            content: None,
            term: None,
        }
    }

    fn query_map(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_build_default_params() {
        let result = build_tracking_url("https://example.com/page", &utm("abc123")).unwrap();
        assert_eq!(
            result,
            "https://example.com/page?utm_source=youtube&utm_medium=video&utm_campaign=abc123"
        );
    }

    #[test]
    fn test_build_with_content_and_term() {
        let mut params = utm("abc123");
        params.content = Some("description".to_string());
        params.term = Some("rust tutorial".to_string());

        let result = build_tracking_url("https://example.com", &params).unwrap();
        let parsed = query_map(&result);

        assert_eq!(parsed["utm_content"], "description");
        assert_eq!(parsed["utm_term"], "rust tutorial");
    }

    #[test]
    fn test_preserves_existing_query_params() {
        let result =
            build_tracking_url("https://example.com/page?ref=nav&lang=en", &utm("v1")).unwrap();
        let parsed = query_map(&result);

        assert_eq!(parsed["ref"], "nav");
        assert_eq!(parsed["lang"], "en");
        assert_eq!(parsed["utm_campaign"], "v1");
    }

    #[test]
    fn test_replaces_existing_utm_params() {
        let result = build_tracking_url(
            "https://example.com/?utm_source=newsletter&x=1",
            &utm("abc123"),
        )
        .unwrap();
        let parsed = query_map(&result);

        assert_eq!(parsed["utm_source"], "youtube");
        assert_eq!(parsed["x"], "1");

        let source_count = Url::parse(&result)
            .unwrap()
            .query_pairs()
            .filter(|(k, _)| k == "utm_source")
            .count();
        assert_eq!(source_count, 1);
    }

    #[test]
    fn test_idempotent_construction() {
        let params = utm("abc123");
        let first = build_tracking_url("https://example.com/page?ref=nav", &params).unwrap();
        let second = build_tracking_url(&first, &params).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_roundtrip_parameter_values() {
        let mut params = utm("campaign with spaces");
        params.content = Some("a&b=c".to_string());

        let result = build_tracking_url("https://example.com", &params).unwrap();
        let parsed = query_map(&result);

        assert_eq!(parsed["utm_campaign"], "campaign with spaces");
        assert_eq!(parsed["utm_content"], "a&b=c");
    }

    #[test]
    fn test_rejects_relative_url() {
        let result = build_tracking_url("/just/a/path", &utm("x"));
        assert!(matches!(result, Err(TrackingUrlError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = build_tracking_url("javascript:alert(1)", &utm("x"));
        assert!(matches!(result, Err(TrackingUrlError::UnsupportedProtocol)));

        let result = build_tracking_url("ftp://example.com/file", &utm("x"));
        assert!(matches!(result, Err(TrackingUrlError::UnsupportedProtocol)));
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(build_tracking_url("", &utm("x")).is_err());
    }
}
