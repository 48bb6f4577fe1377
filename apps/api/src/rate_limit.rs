//! Per-IP fixed-window rate limiting for the AI routes, backed by Redis.
//!
//! Each client gets one counter per window (`rate:ai:{ip}:{window}`). The
//! first hit in a window sets the key's expiry. When Redis cannot be reached
//! requests are let through and a warning is logged.

use std::net::{IpAddr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

const KEY_PREFIX: &str = "rate:ai";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allow,
    Deny { retry_after_secs: u64 },
}

impl RateLimitPolicy {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.max(1),
        }
    }

    /// Index of the window that contains `now_secs`.
    pub fn window_index(&self, now_secs: u64) -> u64 {
        now_secs / self.window_secs
    }

    pub fn key(&self, client: &str, now_secs: u64) -> String {
        format!("{KEY_PREFIX}:{client}:{}", self.window_index(now_secs))
    }

    /// `count` is the counter value after this request was added.
    pub fn decide(&self, count: u64, now_secs: u64) -> RateDecision {
        if count <= u64::from(self.max_requests) {
            return RateDecision::Allow;
        }
        let elapsed = now_secs % self.window_secs;
        RateDecision::Deny {
            retry_after_secs: (self.window_secs - elapsed).max(1),
        }
    }
}

/// Client address for rate limiting.
///
/// `X-Forwarded-For` is only believed when the socket peer is a trusted proxy.
/// Its hops are then walked from the right, skipping further trusted proxies;
/// the first other address is the client. A malformed hop ends the walk at the
/// last address that was read.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trusted: &[IpAddr]) -> String {
    let Some(peer) = peer.map(|p| p.ip()) else {
        return "unknown".to_string();
    };
    if !trusted.contains(&peer) {
        return peer.to_string();
    }

    let mut client = peer;
    let hops = headers
        .get_all("x-forwarded-for")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .collect::<Vec<_>>();
    for hop in hops.iter().rev() {
        match hop.parse::<IpAddr>() {
            Ok(ip) => {
                client = ip;
                if !trusted.contains(&ip) {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    client.to_string()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

async fn hit(client: &redis::Client, key: &str, window_secs: u64) -> redis::RedisResult<u64> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let count: u64 = redis::cmd("INCR").arg(key).query_async(&mut conn).await?;
    if count == 1 {
        redis::cmd("EXPIRE")
            .arg(key)
            .arg(window_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
    }
    Ok(count)
}

/// Axum middleware; mount with `middleware::from_fn_with_state`.
pub async fn limit_ai_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let policy = RateLimitPolicy::new(
        state.config.rate_limit_max_requests,
        state.config.rate_limit_window_secs,
    );
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(request.headers(), peer, &state.config.trusted_proxies);
    let now = now_secs();
    let key = policy.key(&client, now);

    match hit(&state.redis, &key, policy.window_secs).await {
        Ok(count) => {
            if let RateDecision::Deny { retry_after_secs } = policy.decide(count, now) {
                warn!(client = %client, count, "AI rate limit exceeded");
                return Err(AppError::RateLimited { retry_after_secs });
            }
        }
        Err(e) => {
            warn!(client = %client, "Rate limiter unavailable, allowing request: {e}");
        }
    }

    Ok(next.run(request).await)
}
