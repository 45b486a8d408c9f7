/**
 * Reset Request Cooldown
 *
 * Reset requests for one account are counted over a trailing 30-minute
 * window. The first two requests are free; once the window holds `count`
 * codes (count ≥ 2) the next request must come at least
 * `(count - 1) * 5` seconds after the most recent code.
 *
 * | codes in window | wait since last |
 * |---|---|
 * | 0-1 | none |
 * | 2 | 5 s |
 * | 3 | 10 s |
 * | 4 | 15 s |
 */

use chrono::{DateTime, Duration, Utc};

/// Window over which reset requests are counted
pub const ATTEMPT_WINDOW_MINUTES: i64 = 30;

/// Codes allowed in the window before a cooldown applies
pub const FREE_ATTEMPTS: usize = 2;

/// Cooldown added per counted attempt
pub const COOLDOWN_STEP_SECS: i64 = 5;

/// A request that arrived too early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    /// Whole seconds left, rounded up
    pub wait_seconds: u64,
    /// Number this request would have been within the window
    pub attempt_count: u32,
}

/// Start of the counting window for a request at `now`
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::minutes(ATTEMPT_WINDOW_MINUTES)
}

/// Required wait after the most recent code, given the codes in the window
pub fn required_wait(count: usize) -> Option<Duration> {
    if count < FREE_ATTEMPTS {
        return None;
    }
    Some(Duration::seconds((count as i64 - 1) * COOLDOWN_STEP_SECS))
}

/// Check a request against the codes already issued in the window
///
/// # Arguments
/// * `recent` - Creation times inside the window, in any order
/// * `now` - Time of the request
///
/// # Returns
/// `Some(Cooldown)` when the request must be rejected
pub fn cooldown_remaining(recent: &[DateTime<Utc>], now: DateTime<Utc>) -> Option<Cooldown> {
    let wait = required_wait(recent.len())?;
    let last = recent.iter().max()?;
    let elapsed = now - *last;

    if elapsed >= wait {
        return None;
    }

    Some(Cooldown {
        wait_seconds: crate::backend::throttle::ceil_seconds(wait - elapsed).max(1),
        attempt_count: u32::try_from(recent.len() + 1).unwrap_or(u32::MAX),
    })
}
