//! # slot-engine
//!
//! Deterministic slot computation for a content-scheduling calendar.
//!
//! The engine places posts onto a week/month grid, converts stored slots
//! between the timezone they were scheduled in and the timezone the calendar
//! is currently viewed in (preserving the wall-clock digits, not the
//! absolute instant), detects hour-level collisions, and deterministically
//! reassigns a dropped post to a free hour.
//!
//! Everything is a pure function of explicit inputs — no system clock, no
//! ambient timezone state, no locks. The surrounding application fetches a
//! snapshot of posts, calls in, and persists the result through the
//! [`PostStore`] port.
//!
//! ## Modules
//!
//! - [`post`] — Post records, slot assignments, the scheduling lifecycle
//! - [`timezone`] — Wall-clock-preserving conversion and display helpers
//! - [`occupancy`] — Per-day occupied-hours index in the viewing timezone
//! - [`slot`] — Best-slot search with the 9-to-23-then-6-to-8 fallback scan
//! - [`scheduler`] — Conflict-aware scheduling and the persistence port
//! - [`grid`] — Read-only week/month grid projection
//! - [`error`] — Error types

pub mod error;
pub mod grid;
pub mod occupancy;
pub mod post;
pub mod scheduler;
pub mod slot;
pub mod timezone;

pub use error::{Result, SlotError};
pub use grid::{month_days, position_posts, week_days, PositionedPost};
pub use occupancy::occupied_hours;
pub use post::{Post, PostStatus, SlotAssignment, ViewingContext, WeekStartDay};
pub use scheduler::{
    move_post_to_day, preferred_hour_for_move, remove_from_calendar, resolve_scheduling_request,
    schedule_post, PostStore, ScheduleChange, SchedulingOutcome, SlotRequest,
};
pub use slot::{find_best_available_hour, DEFAULT_START_HOUR, EARLIEST_SUGGESTED_HOUR};
pub use timezone::{local_date_and_hour, timezone_abbreviation, viewing_instant};
