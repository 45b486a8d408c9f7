//! Throttle Module
//!
//! Store-backed request rate limiting. Each accepted request appends a row
//! to `throttle_hits` keyed by a scope (which limit) and an ident (which
//! client). A request is rejected when the client already has
//! `max_requests` hits inside the trailing window; rejected requests are not
//! recorded, so a throttled client is let back in as soon as its oldest
//! counted hit leaves the window.
//!
//! The decision itself ([`evaluate`]) is a pure function over the fetched
//! history, which keeps the arithmetic testable without a database.
//!
//! Limits are advisory: two concurrent requests may both read the same
//! history and both be accepted.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

/// A named request budget per client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub scope: &'static str,
    pub max_requests: usize,
    pub window_secs: i64,
}

impl RateLimit {
    pub fn window(&self) -> Duration {
        Duration::seconds(self.window_secs)
    }
}

/// Anonymous newsletter signups: 3 per hour
pub const NEWSLETTER: RateLimit = RateLimit {
    scope: "newsletter",
    max_requests: 3,
    window_secs: 60 * 60,
};

/// Outcome of a throttle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Rejected; retry after this many whole seconds
    Deny { wait_seconds: u64 },
}

/// Decide whether another request fits in the budget
///
/// # Arguments
/// * `limit` - The budget
/// * `history` - Previous accepted hits, in any order
/// * `now` - Time of the incoming request
pub fn evaluate(limit: &RateLimit, history: &[DateTime<Utc>], now: DateTime<Utc>) -> Decision {
    let window_start = now - limit.window();
    let mut recent: Vec<DateTime<Utc>> = history.iter().copied().filter(|t| *t > window_start).collect();

    if recent.len() < limit.max_requests {
        return Decision::Allow;
    }

    recent.sort_unstable();
    // The hit whose expiry brings the count back under the limit
    let freeing = recent[recent.len() - limit.max_requests];
    let remaining = (freeing + limit.window()) - now;

    Decision::Deny {
        wait_seconds: ceil_seconds(remaining).max(1),
    }
}

/// Whole seconds, rounded up
pub fn ceil_seconds(duration: Duration) -> u64 {
    let millis = duration.num_milliseconds();
    if millis <= 0 {
        0
    } else {
        ((millis + 999) / 1000) as u64
    }
}

/// Check a client against a limit and record the hit when accepted
///
/// Hits in this scope that have left the window are pruned first, for
/// every client, so idents that never return do not accumulate.
pub async fn check_and_record(
    pool: &SqlitePool,
    limit: &RateLimit,
    ident: &str,
    now: DateTime<Utc>,
) -> Result<Decision, sqlx::Error> {
    let window_start = now - limit.window();

    sqlx::query("DELETE FROM throttle_hits WHERE scope = ? AND hit_at <= ?")
        .bind(limit.scope)
        .bind(window_start)
        .execute(pool)
        .await?;

    let history: Vec<DateTime<Utc>> = sqlx::query_scalar(
        "SELECT hit_at FROM throttle_hits WHERE scope = ? AND ident = ? ORDER BY hit_at",
    )
    .bind(limit.scope)
    .bind(ident)
    .fetch_all(pool)
    .await?;

    let decision = evaluate(limit, &history, now);

    if decision == Decision::Allow {
        sqlx::query("INSERT INTO throttle_hits (scope, ident, hit_at) VALUES (?, ?, ?)")
            .bind(limit.scope)
            .bind(ident)
            .bind(now)
            .execute(pool)
            .await?;
    } else {
        tracing::warn!("Throttled {} request from {}", limit.scope, ident);
    }

    Ok(decision)
}

/// Identity of an anonymous client
///
/// The `X-Forwarded-For` header with whitespace removed when present,
/// otherwise the peer IP address, otherwise `unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdent(pub String);

impl ClientIdent {
    pub fn from_parts(parts: &Parts) -> Self {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|h| h.to_str().ok())
            .map(|xff| xff.split_whitespace().collect::<String>())
            .filter(|xff| !xff.is_empty());

        if let Some(xff) = forwarded {
            return Self(xff);
        }

        match parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            Some(ConnectInfo(addr)) => Self(addr.ip().to_string()),
            None => Self("unknown".to_string()),
        }
    }
}

impl<S> FromRequestParts<S> for ClientIdent
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
