//! Client IP resolution for rate limiting
//!
//! `X-Forwarded-For` is only trusted up to the configured number of proxies so a
//! client cannot pick its own rate-limit bucket by prepending addresses.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

pub const UNKNOWN_CLIENT: &str = "unknown";

/// Resolve the caller's IP.
///
/// Order: `X-Forwarded-For` (honouring `trusted_proxy_count`), `X-Real-IP`,
/// the socket peer, then `"unknown"`.
pub fn extract_client_ip(
    headers: &HeaderMap,
    socket_addr: Option<&SocketAddr>,
    trusted_proxy_count: usize,
) -> String {
    header_str(headers, "x-forwarded-for")
        .and_then(|chain| client_from_forwarded_chain(chain, trusted_proxy_count))
        .or_else(|| header_str(headers, "x-real-ip").and_then(parse_ip))
        .or_else(|| socket_addr.map(SocketAddr::ip))
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn parse_ip(candidate: &str) -> Option<IpAddr> {
    candidate.trim().parse().ok()
}

/// Pick the client out of `client, proxy1, proxy2, ...`.
///
/// With N trusted proxies the last N hops are ours and the entry before them is
/// the client. With no trusted proxies, or a chain no longer than N, only the
/// hop closest to us is used.
fn client_from_forwarded_chain(chain: &str, trusted_proxy_count: usize) -> Option<IpAddr> {
    let hops: Vec<&str> = chain
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let position = if trusted_proxy_count == 0 || hops.len() <= trusted_proxy_count {
        hops.len().checked_sub(1)?
    } else {
        hops.len() - trusted_proxy_count - 1
    };

    hops.get(position).copied().and_then(parse_ip)
}
