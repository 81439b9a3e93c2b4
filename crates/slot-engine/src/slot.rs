//! Best-slot search: pick the hour a drop actually lands on.
//!
//! The search is pure and total — it always returns an hour, never an error,
//! because the drag-and-drop caller must always have something actionable to
//! show. When the whole suggestable window is taken it knowingly
//! double-books rather than failing.
//!
//! The fallback is *not* a nearest-hour search. A taken 14:00 request
//! resolves to the first free hour at or after 09:00, which can be earlier
//! than 14:00. That is the shipped behavior of the calendar this engine
//! backs, kept as-is.

use std::collections::BTreeSet;

/// Hours before this are never auto-suggested, even when free. Posts are
/// professional social content; proposing a 4 AM publish time helps nobody.
pub const EARLIEST_SUGGESTED_HOUR: u32 = 6;

/// Where the ascending scan starts, and the hour of last resort when every
/// suggestable slot is taken.
pub const DEFAULT_START_HOUR: u32 = 9;

/// Find the hour (0-23) to assign a post to on a day with the given
/// occupied hours.
///
/// # Policy, in order
///
/// 1. A requested hour that is free is honored unchanged.
/// 2. Otherwise the first free hour scanning 9..=23 ascending.
/// 3. Otherwise the first free hour scanning 6..=8 ascending.
/// 4. Otherwise (all of 6-23 taken, i.e. eighteen posts already on the day)
///    hour 9, accepting a double-booking as a last resort.
///
/// Out-of-range requested hours (>= 24) are treated as no request.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use slot_engine::find_best_available_hour;
///
/// let occupied = BTreeSet::from([9, 10, 11]);
/// // Requested 9 is taken; the 9..=23 scan skips 9, 10, 11.
/// assert_eq!(find_best_available_hour(&occupied, Some(9)), 12);
/// ```
pub fn find_best_available_hour(occupied: &BTreeSet<u32>, preferred_hour: Option<u32>) -> u32 {
    if let Some(hour) = preferred_hour.filter(|h| *h < 24) {
        if !occupied.contains(&hour) {
            return hour;
        }
    }

    (DEFAULT_START_HOUR..24)
        .chain(EARLIEST_SUGGESTED_HOUR..DEFAULT_START_HOUR)
        .find(|hour| !occupied.contains(hour))
        .unwrap_or(DEFAULT_START_HOUR)
}

// ── Tests ───────────────────────────────────────────────────────────────────
