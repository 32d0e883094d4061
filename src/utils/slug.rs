//! Pretty slug generation and validation.
//!
//! Provides cryptographically secure random slug generation and validation
//! for caller-supplied slug candidates.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding; 6 bytes encode to an
/// 8-character URL-safe token, enough to make collisions negligible at
/// expected link volumes.
const SLUG_LENGTH_BYTES: usize = 6;

/// Slugs that cannot be used because they collide with service routes.
const RESERVED_SLUGS: &[&str] = &["api", "r", "health", "stats", "links", "admin"];

/// Generates a cryptographically secure random pretty slug.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing an 8-character token.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_slug() -> String {
    let mut buffer = [0u8; SLUG_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a caller-supplied slug candidate.
///
/// # Rules
///
/// - Length: 4-50 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route word
///
/// A valid candidate is reserved as-is; it is never silently rewritten.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_slug_candidate(slug: &str) -> Result<(), AppError> {
    if slug.len() < 4 || slug.len() > 50 {
        return Err(AppError::bad_request(
            "Pretty slug must be 4-50 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Pretty slug can only contain lowercase letters, digits, and hyphens",
            json!({ "slug": slug }),
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(AppError::bad_request(
            "Pretty slug cannot start or end with a hyphen",
            json!({ "slug": slug }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}
