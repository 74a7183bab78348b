//! Expiry Policy Module
//!
//! Translates a requested time-to-live into a stored deadline and judges
//! whether a stored deadline is still valid at read time.

use std::time::{SystemTime, UNIX_EPOCH};

// == Constants ==
/// Default caching period: 30 days, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Reserved deadline meaning "never expires".
///
/// Never produced by [`compute_deadline`]; only read back faithfully if a
/// stored entry already carries it.
pub const NEVER_EXPIRES: u64 = 0;

// == Deadline Computation ==
/// Computes the absolute deadline for an entry written now.
///
/// # Arguments
/// * `ttl_seconds` - Relative TTL; `None` falls back to [`DEFAULT_TTL_SECS`]
/// * `now` - Current time as seconds since epoch
pub fn compute_deadline(ttl_seconds: Option<u64>, now: u64) -> u64 {
    now + ttl_seconds.unwrap_or(DEFAULT_TTL_SECS)
}

// == Freshness Check ==
/// Returns true if an entry with the given deadline is still usable.
///
/// Strictly greater-than: a deadline equal to `now` is already expired.
/// The [`NEVER_EXPIRES`] sentinel is always fresh.
pub fn is_fresh(deadline: u64, now: u64) -> bool {
    deadline == NEVER_EXPIRES || deadline > now
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
