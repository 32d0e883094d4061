//! Client IP extraction from request context.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Resolves the client IP for a request.
///
/// When `behind_proxy` is true, forwarding headers are consulted first:
/// the leftmost entry of `X-Forwarded-For`, then `X-Real-IP`. Header values
/// that do not parse as an IP address are ignored. Otherwise (or when no
/// usable header is present) the socket peer address is used.
///
/// Enable `behind_proxy` only when the service sits behind a trusted reverse
/// proxy; the headers are client-controlled otherwise.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(ip) = forwarded_ip(headers) {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
        && let Ok(ip) = first.trim().parse::<IpAddr>()
    {
        return Some(ip);
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
}
