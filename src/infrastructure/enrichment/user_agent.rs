//! User-agent parsing via woothee.

use woothee::parser::Parser;

/// Browser and device class derived from a user-agent string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAgent {
    pub device_type: Option<String>,
    pub browser: Option<String>,
}

/// Parses a user-agent string into a coarse device class and browser family.
///
/// Woothee's `pc` category is reported as `desktop`; phone categories
/// collapse to `mobile`. Unrecognized agents yield empty fields rather than
/// guesses.
pub fn parse_user_agent(ua: &str) -> ParsedAgent {
    let parser = Parser::new();

    let Some(result) = parser.parse(ua) else {
        return ParsedAgent::default();
    };

    let device_type = match result.category {
        "pc" => Some("desktop".to_string()),
        "smartphone" | "mobilephone" => Some("mobile".to_string()),
        "crawler" => Some("crawler".to_string()),
        "UNKNOWN" | "" => None,
        other => Some(other.to_string()),
    };

    let browser = if result.name != "UNKNOWN" && !result.name.is_empty() {
        Some(result.name.to_string())
    } else {
        None
    };

    ParsedAgent {
        device_type,
        browser,
    }
}
