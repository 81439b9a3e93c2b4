//! Conflict-aware scheduling: turn a drop intent into a persisted slot.
//!
//! The computation itself is a pure function of a posts snapshot — no locks,
//! no clock, no ambient state. Two concurrent drops computed from snapshots
//! taken before either completes can both resolve to the same hour and both
//! succeed; that race is an acknowledged property of the system, and the
//! store is the place to add a uniqueness constraint if one is wanted. The
//! engine stays a computation, not a reservation service.
//!
//! All I/O lives behind [`PostStore`]; [`resolve_scheduling_request`] is the
//! pure core, and [`schedule_post`] / [`move_post_to_day`] /
//! [`remove_from_calendar`] are the thin orchestration around it.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SlotError};
use crate::occupancy::occupied_hours;
use crate::post::{Post, PostStatus, SlotAssignment};
use crate::slot::find_best_available_hour;
use crate::timezone::local_date_and_hour;

// ── Requests and outcomes ───────────────────────────────────────────────────

/// What the user asked for when dropping a post onto the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotRequest {
    /// A day with no particular hour — clicking "+" on a month cell. The
    /// best-slot search picks the hour, and the outcome is never reported
    /// as adjusted: there was no specific request to adjust.
    DayOnly,
    /// A specific hour (and optionally minute) on the target day.
    AtHour { hour: u32, minute: u32 },
}

impl SlotRequest {
    /// A request for a specific hour at minute zero.
    pub fn at_hour(hour: u32) -> Self {
        Self::AtHour { hour, minute: 0 }
    }
}

/// The resolved result of a scheduling request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingOutcome {
    /// The absolute instant the post lands on.
    pub final_instant: DateTime<Utc>,
    /// The viewing timezone the slot was chosen in, to be stored with it.
    pub timezone: String,
    /// Whether a requested hour had to be moved to avoid a conflict.
    pub was_adjusted: bool,
}

// ── Pure core ───────────────────────────────────────────────────────────────

/// Resolve a scheduling request against a snapshot of posts.
///
/// Deterministic: identical inputs and an identical snapshot always produce
/// the identical outcome. The post being scheduled is excluded from the
/// occupancy it is checked against, so rescheduling within a day never
/// conflicts with the post's own current slot.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slot_engine::{resolve_scheduling_request, SlotRequest};
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let outcome = resolve_scheduling_request("post-1", day, SlotRequest::at_hour(14), &[], "UTC");
/// assert!(!outcome.was_adjusted);
/// ```
pub fn resolve_scheduling_request(
    post_id: &str,
    target_day: NaiveDate,
    request: SlotRequest,
    posts: &[Post],
    viewing_timezone: &str,
) -> SchedulingOutcome {
    let occupied = occupied_hours(posts, target_day, viewing_timezone, Some(post_id));

    let (preferred, minute) = match request {
        SlotRequest::DayOnly => (None, 0),
        SlotRequest::AtHour { hour, minute } => (Some(hour), minute),
    };

    let resolved = find_best_available_hour(&occupied, preferred);
    let was_adjusted = preferred.is_some_and(|hour| hour != resolved);
    if was_adjusted {
        debug!(post_id, requested = preferred, resolved, "requested slot taken, adjusted");
    }

    SchedulingOutcome {
        final_instant: compose_instant(target_day, resolved, minute, viewing_timezone),
        timezone: viewing_timezone.to_string(),
        was_adjusted,
    }
}

/// The hour-of-day a post currently occupies in the viewing timezone.
///
/// Used when a post is dragged onto another day: passing this as the
/// requested hour lets "move to Tuesday" keep the post's 14:00 intent,
/// subject to conflict resolution on the new day. `None` for drafts.
pub fn preferred_hour_for_move(post: &Post, viewing_timezone: &str) -> Option<u32> {
    post.viewing_instant(viewing_timezone)
        .map(|instant| local_date_and_hour(instant, viewing_timezone).1)
}

/// Build the absolute instant for `day` at the given local time in the
/// viewing timezone.
///
/// Total: a DST gap resolves to the earliest valid reading, an unparseable
/// zone falls back to interpreting the wall time as UTC.
fn compose_instant(day: NaiveDate, hour: u32, minute: u32, viewing_timezone: &str) -> DateTime<Utc> {
    let naive = match day.and_hms_opt(hour.min(23), minute.min(59), 0) {
        Some(naive) => naive,
        None => day.and_time(NaiveTime::MIN),
    };

    match viewing_timezone.parse::<Tz>() {
        Ok(tz) => match tz.from_local_datetime(&naive).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => {
                warn!(zone = viewing_timezone, wall = %naive, "wall time in DST gap, storing as UTC");
                Utc.from_utc_datetime(&naive)
            }
        },
        Err(_) => {
            warn!(zone = viewing_timezone, "invalid viewing timezone, storing as UTC");
            Utc.from_utc_datetime(&naive)
        }
    }
}

// ── Persistence port ────────────────────────────────────────────────────────

/// The single scheduling-field mutation the engine ever issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleChange {
    /// Place the post on the calendar: status becomes scheduled with this
    /// assignment, in one atomic update.
    Assign(SlotAssignment),
    /// Take the post off the calendar, back to draft.
    ReturnToDraft,
}

/// The persistence collaborator, as seen by the engine.
///
/// Implementations are scoped to one user's calendar. The engine never
/// deletes posts and never touches anything but the scheduling fields.
pub trait PostStore {
    /// The current snapshot of the user's posts, drafts included (a draft
    /// must appear here to be schedulable).
    fn list_scheduled_posts(&self) -> Result<Vec<Post>>;

    /// Apply a scheduling change to one post. Must be atomic from the
    /// caller's perspective: a reader never observes a scheduled status with
    /// a stale or missing assignment.
    fn update_post_schedule(&mut self, post_id: &str, change: ScheduleChange) -> Result<()>;
}

// ── Orchestration ───────────────────────────────────────────────────────────

/// Schedule or reschedule a post: fetch a snapshot, resolve the request,
/// persist the assignment.
///
/// The returned outcome reports whether the requested slot was honored or
/// adjusted. Published posts are rejected — publishing pins a post to its
/// slot — and unknown ids fail rather than creating anything.
///
/// # Errors
///
/// [`SlotError::UnknownPost`] if the snapshot has no such post,
/// [`SlotError::PostImmovable`] if the post is already published, or
/// [`SlotError::Store`] if the persistence update is refused.
pub fn schedule_post<S: PostStore>(
    store: &mut S,
    post_id: &str,
    target_day: NaiveDate,
    request: SlotRequest,
    viewing_timezone: &str,
) -> Result<SchedulingOutcome> {
    let posts = store.list_scheduled_posts()?;
    let post = find_post(&posts, post_id)?;
    ensure_movable(post)?;

    let outcome = resolve_scheduling_request(post_id, target_day, request, &posts, viewing_timezone);
    store.update_post_schedule(
        post_id,
        ScheduleChange::Assign(SlotAssignment::new(outcome.final_instant, viewing_timezone)),
    )?;
    Ok(outcome)
}

/// Move a post to another day, preserving its current hour-of-day intent.
///
/// This is the drag-to-month-cell path: the requested hour is the post's
/// *own* current hour in the viewing timezone, not a fixed default, so the
/// move keeps the time of day unless the new day already has it taken. A
/// draft (no current hour) falls back to a day-only request.
///
/// # Errors
///
/// Same as [`schedule_post`].
pub fn move_post_to_day<S: PostStore>(
    store: &mut S,
    post_id: &str,
    target_day: NaiveDate,
    viewing_timezone: &str,
) -> Result<SchedulingOutcome> {
    let posts = store.list_scheduled_posts()?;
    let post = find_post(&posts, post_id)?;
    ensure_movable(post)?;

    let request = match preferred_hour_for_move(post, viewing_timezone) {
        Some(hour) => SlotRequest::at_hour(hour),
        None => SlotRequest::DayOnly,
    };

    let outcome = resolve_scheduling_request(post_id, target_day, request, &posts, viewing_timezone);
    store.update_post_schedule(
        post_id,
        ScheduleChange::Assign(SlotAssignment::new(outcome.final_instant, viewing_timezone)),
    )?;
    Ok(outcome)
}

/// Take a scheduled post off the calendar, returning it to draft.
///
/// Removing a post that is already a draft is a no-op; removing a published
/// post is rejected.
///
/// # Errors
///
/// [`SlotError::UnknownPost`], [`SlotError::PostImmovable`], or
/// [`SlotError::Store`].
pub fn remove_from_calendar<S: PostStore>(store: &mut S, post_id: &str) -> Result<()> {
    let posts = store.list_scheduled_posts()?;
    let post = find_post(&posts, post_id)?;

    match post.status {
        PostStatus::Draft => Ok(()),
        PostStatus::Published(_) => Err(SlotError::PostImmovable(post_id.to_string())),
        PostStatus::Scheduled(_) => store.update_post_schedule(post_id, ScheduleChange::ReturnToDraft),
    }
}

fn find_post<'a>(posts: &'a [Post], post_id: &str) -> Result<&'a Post> {
    posts
        .iter()
        .find(|post| post.id == post_id)
        .ok_or_else(|| SlotError::UnknownPost(post_id.to_string()))
}

fn ensure_movable(post: &Post) -> Result<()> {
    if matches!(post.status, PostStatus::Published(_)) {
        return Err(SlotError::PostImmovable(post.id.clone()));
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────
