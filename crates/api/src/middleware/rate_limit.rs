//! Per-address quota for the anonymous submission endpoints.
//!
//! Backed by a `governor` keyed limiter: each client address gets a bucket
//! of `RATE_LIMIT_PER_MINUTE` requests that refills evenly over a minute.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use classhopper_core::error::CoreError;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::error::AppError;
use crate::state::AppState;

pub type ClientRateLimiter = DefaultKeyedRateLimiter<String>;

/// Key used when the socket address is unavailable.
const UNKNOWN_ADDRESS: &str = "unknown";

/// Build the shared limiter for `per_minute` requests per client address.
pub fn build_rate_limiter(per_minute: u32) -> Arc<ClientRateLimiter> {
    let per_minute = NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute)))
}

/// Resolve the caller's address.
///
/// The socket peer is the address unless it is one of `trusted_proxies`.
/// Behind a trusted proxy the `X-Forwarded-For` chain is walked from the
/// right, skipping further trusted hops, and the first other entry wins;
/// `X-Real-IP` is used when the chain is absent. Entries that do not parse
/// as IP addresses are ignored.
pub fn client_address(parts: &Parts, trusted_proxies: &[IpAddr]) -> String {
    let Some(peer) = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
    else {
        return UNKNOWN_ADDRESS.to_string();
    };

    if !trusted_proxies.contains(&peer) {
        return peer.to_string();
    }

    let forwarded = header_value(parts, "x-forwarded-for").and_then(|chain| {
        chain
            .rsplit(',')
            .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
            .find(|ip| !trusted_proxies.contains(ip))
    });
    let real_ip =
        || header_value(parts, "x-real-ip").and_then(|v| v.trim().parse::<IpAddr>().ok());

    forwarded.or_else(real_ip).unwrap_or(peer).to_string()
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

/// An anonymous caller that is within its submission quota.
///
/// Extracting this consumes one unit of the caller's quota; over quota the
/// request is rejected with 429 before the body is read.
#[derive(Debug, Clone)]
pub struct PublicClient {
    pub address: String,
    pub user_agent: String,
}

impl FromRequestParts<AppState> for PublicClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let address = client_address(parts, &state.config.trusted_proxies);

        if state.rate_limiter.check_key(&address).is_err() {
            tracing::warn!(client = %address, "Public submission rate limit exceeded");
            return Err(AppError::Core(CoreError::RateLimited(
                "Too many submissions. Please try again later.".into(),
            )));
        }

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(PublicClient {
            address,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    const PROXY: [u8; 4] = [10, 0, 0, 1];

    fn parts(peer: Option<[u8; 4]>, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let mut parts = builder.body(()).unwrap().into_parts().0;
        if let Some(ip) = peer {
            parts.extensions.insert(ConnectInfo(SocketAddr::from((ip, 4000))));
        }
        parts
    }

    fn trusted() -> Vec<IpAddr> {
        vec![IpAddr::from(PROXY)]
    }

    #[test]
    fn untrusted_peer_ignores_forwarding_headers() {
        let p = parts(
            Some([192, 0, 2, 1]),
            &[("x-forwarded-for", "203.0.113.7"), ("x-real-ip", "198.51.100.2")],
        );
        assert_eq!(client_address(&p, &trusted()), "192.0.2.1");
        assert_eq!(client_address(&p, &[]), "192.0.2.1");
    }

    #[test]
    fn trusted_proxy_uses_rightmost_untrusted_hop() {
        let p = parts(
            Some(PROXY),
            &[("x-forwarded-for", "6.6.6.6, 203.0.113.7, 10.0.0.1")],
        );
        assert_eq!(client_address(&p, &trusted()), "203.0.113.7");
    }

    #[test]
    fn trusted_proxy_falls_back_to_real_ip_then_peer() {
        let p = parts(Some(PROXY), &[("x-real-ip", "198.51.100.2")]);
        assert_eq!(client_address(&p, &trusted()), "198.51.100.2");

        let p = parts(Some(PROXY), &[("x-forwarded-for", "garbage")]);
        assert_eq!(client_address(&p, &trusted()), "10.0.0.1");
    }

    #[test]
    fn missing_socket_address_is_unknown() {
        let p = parts(None, &[("x-forwarded-for", "203.0.113.7")]);
        assert_eq!(client_address(&p, &trusted()), UNKNOWN_ADDRESS);
    }

    #[test]
    fn rotating_forwarded_for_shares_one_bucket() {
        let limiter = build_rate_limiter(10);
        let allowed = (0..50)
            .filter(|i| {
                let spoofed = format!("203.0.113.{i}");
                let p = parts(Some([192, 0, 2, 1]), &[("x-forwarded-for", spoofed.as_str())]);
                limiter.check_key(&client_address(&p, &trusted())).is_ok()
            })
            .count();
        assert_eq!(allowed, 10);
    }

    #[test]
    fn limiter_allows_quota_then_refuses() {
        let limiter = build_rate_limiter(3);
        let key = "203.0.113.7".to_string();
        for _ in 0..3 {
            assert!(limiter.check_key(&key).is_ok());
        }
        assert!(limiter.check_key(&key).is_err());
        assert!(limiter.check_key(&"198.51.100.2".to_string()).is_ok());
    }
}
