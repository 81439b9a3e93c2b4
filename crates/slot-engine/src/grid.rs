//! Calendar grid projection: which cell each post renders in.
//!
//! Read-only. The grid consumes posts positioned by the occupancy rules and
//! never mutates anything; drops and clicks go back through the scheduler.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::post::{Post, WeekStartDay};
use crate::timezone::viewing_instant;

// ── Positioned posts ────────────────────────────────────────────────────────

/// A post placed on the grid, in viewing-timezone cell coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionedPost {
    pub post_id: String,
    pub date: NaiveDate,
    /// Hour-of-day cell, 0-23, local to the viewing timezone.
    pub hour: u32,
    pub minute: u32,
    /// False for published posts, which render but cannot be picked up.
    pub draggable: bool,
}

/// Project posts onto the given days of the grid, in the viewing timezone.
///
/// Drafts are skipped; scheduled and published posts are both positioned
/// (published ones marked non-draggable). Output is sorted by cell, with
/// creation time and id as tie-breaks so posts sharing an hour render in a
/// stable order.
pub fn position_posts(posts: &[Post], days: &[NaiveDate], viewing_timezone: &str) -> Vec<PositionedPost> {
    let mut positioned: Vec<(PositionedPost, DateTime<Utc>)> = posts
        .iter()
        .filter_map(|post| {
            let slot = post.slot()?;
            let instant = viewing_instant(slot, viewing_timezone);
            let (date, hour, minute) = local_cell(instant, viewing_timezone);
            days.contains(&date).then(|| {
                (
                    PositionedPost {
                        post_id: post.id.clone(),
                        date,
                        hour,
                        minute,
                        draggable: post.is_draggable(),
                    },
                    post.created_at,
                )
            })
        })
        .collect();

    positioned.sort_by(|(a, a_created), (b, b_created)| {
        (a.date, a.hour, a.minute, *a_created, &a.post_id)
            .cmp(&(b.date, b.hour, b.minute, *b_created, &b.post_id))
    });
    positioned.into_iter().map(|(post, _)| post).collect()
}

fn local_cell(instant: DateTime<Utc>, viewing_timezone: &str) -> (NaiveDate, u32, u32) {
    match viewing_timezone.parse::<Tz>() {
        Ok(tz) => {
            let local = instant.with_timezone(&tz);
            (local.date_naive(), local.hour(), local.minute())
        }
        Err(_) => (instant.date_naive(), instant.hour(), instant.minute()),
    }
}

// ── Day ranges ──────────────────────────────────────────────────────────────

/// The seven days of the week containing `anchor`, honoring the configured
/// week start.
pub fn week_days(anchor: NaiveDate, week_start: WeekStartDay) -> [NaiveDate; 7] {
    let offset = match week_start {
        WeekStartDay::Monday => anchor.weekday().num_days_from_monday(),
        WeekStartDay::Sunday => anchor.weekday().num_days_from_sunday(),
    };
    let start = anchor - chrono::Duration::days(i64::from(offset));
    std::array::from_fn(|i| start + chrono::Duration::days(i as i64))
}

/// Every day of a calendar month, in order. Empty for an invalid month.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(first);

    first.iter_days().take_while(|d| *d <= last).collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────
