//! Wall-clock-preserving timezone conversion.
//!
//! A post scheduled for "9 AM my time" should keep reading 9 AM for the same
//! user even when the calendar's viewing timezone changes between sessions:
//! the scheduling intent is the wall-clock hour, not the absolute instant.
//! [`viewing_instant`] therefore re-stamps the clock face — it renders the
//! stored instant in the timezone the slot was chosen in, takes those
//! date/time digits, and re-interprets them in the viewing timezone. This is
//! deliberately *not* a physical offset conversion.
//!
//! Every function here is total. Invalid IANA names, missing legacy
//! timezones, and DST gaps all degrade to returning the stored instant
//! unchanged, with a `tracing` warning; the calendar must always have
//! something to render.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::post::{Post, SlotAssignment};

// ── Conversion ──────────────────────────────────────────────────────────────

/// Convert a slot assignment into the instant it should display as in the
/// viewing timezone.
///
/// # Policy
///
/// - No stored timezone (legacy record) → the instant is returned unchanged,
///   interpreted as already expressed in the viewing timezone.
/// - Stored timezone equals the viewing timezone → unchanged (fast path).
/// - Otherwise the wall-clock components the instant displays as in the
///   stored timezone are re-interpreted in the viewing timezone: a slot that
///   reads 09:00 in `America/New_York` yields the instant that reads 09:00
///   in `Europe/London`.
/// - Any failure (unparseable zone on either side, wall time falling into a
///   DST gap) logs a warning and returns the stored instant unchanged.
///
/// Ambiguous wall times (DST fall-back repeats an hour) resolve to the
/// earlier of the two instants.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use slot_engine::{viewing_instant, SlotAssignment};
///
/// // 09:00 in New York (EDT, UTC-4) on June 10.
/// let slot = SlotAssignment::new(
///     Utc.with_ymd_and_hms(2024, 6, 10, 13, 0, 0).unwrap(),
///     "America/New_York",
/// );
/// let in_london = viewing_instant(&slot, "Europe/London");
/// // Same digits, different instant: 09:00 BST = 08:00 UTC.
/// assert_eq!(in_london, Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap());
/// ```
pub fn viewing_instant(slot: &SlotAssignment, viewing_timezone: &str) -> DateTime<Utc> {
    let Some(scheduled_zone) = slot.timezone.as_deref() else {
        return slot.at;
    };
    if scheduled_zone == viewing_timezone {
        return slot.at;
    }

    let Ok(from) = scheduled_zone.parse::<Tz>() else {
        warn!(zone = scheduled_zone, "invalid scheduled timezone, using stored instant");
        return slot.at;
    };
    let Ok(to) = viewing_timezone.parse::<Tz>() else {
        warn!(zone = viewing_timezone, "invalid viewing timezone, using stored instant");
        return slot.at;
    };

    let wall = slot.at.with_timezone(&from).naive_local();
    match to.from_local_datetime(&wall).earliest() {
        Some(restamped) => restamped.with_timezone(&Utc),
        None => {
            // The wall time does not exist in the viewing zone (spring-forward gap).
            warn!(
                zone = viewing_timezone,
                wall = %wall,
                "wall time falls in a DST gap, using stored instant"
            );
            slot.at
        }
    }
}

impl Post {
    /// The instant this post displays as in the viewing timezone, or `None`
    /// for a draft with no slot assignment.
    pub fn viewing_instant(&self, viewing_timezone: &str) -> Option<DateTime<Utc>> {
        self.slot().map(|slot| viewing_instant(slot, viewing_timezone))
    }
}

// ── Display helpers ─────────────────────────────────────────────────────────

/// Short display name for a timezone at a given instant (DST-correct, e.g.
/// `EST` in January and `EDT` in July for `America/New_York`).
///
/// Falls back to the trailing path segment of the zone name for names that
/// do not parse (`Mars/Olympus_Mons` → `Olympus_Mons`), and to `"UTC"` for
/// an empty name.
pub fn timezone_abbreviation(timezone: &str, at: DateTime<Utc>) -> String {
    if let Ok(tz) = timezone.parse::<Tz>() {
        return at.with_timezone(&tz).format("%Z").to_string();
    }
    match timezone.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => "UTC".to_string(),
    }
}

/// The calendar date and hour-of-day an instant displays as in the viewing
/// timezone. Degrades to the UTC components when the zone does not parse.
pub fn local_date_and_hour(instant: DateTime<Utc>, viewing_timezone: &str) -> (NaiveDate, u32) {
    match viewing_timezone.parse::<Tz>() {
        Ok(tz) => {
            let local = instant.with_timezone(&tz);
            (local.date_naive(), local.hour())
        }
        Err(_) => {
            warn!(zone = viewing_timezone, "invalid viewing timezone, using UTC components");
            (instant.date_naive(), instant.hour())
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
