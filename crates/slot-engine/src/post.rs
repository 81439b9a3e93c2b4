//! The post record and its scheduling lifecycle.
//!
//! Records flow in from a loosely-typed persistence collaborator, so the
//! presence rules are encoded in the type instead of by convention: a post
//! either carries a [`SlotAssignment`] (scheduled or published) or it does
//! not (draft). There is no state where `status` says "scheduled" but the
//! timestamp is missing.
//!
//! Lifecycle (scheduling-relevant subset):
//!
//! ```text
//! Draft --schedule--> Scheduled --reschedule--> Scheduled --remove--> Draft
//!                     Scheduled --publish (external)--> Published
//! ```
//!
//! `Published` is terminal for scheduling purposes: the post keeps its slot
//! on the calendar (and keeps blocking that hour for other posts) but can no
//! longer be moved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Slot assignment ─────────────────────────────────────────────────────────

/// The calendar slot a post was placed into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// The absolute instant the post is scheduled for.
    pub at: DateTime<Utc>,
    /// The IANA timezone the user was viewing when the slot was chosen.
    ///
    /// `None` for legacy records; those are interpreted as already expressed
    /// in whatever timezone the calendar is currently viewed in.
    pub timezone: Option<String>,
}

impl SlotAssignment {
    /// An assignment stamped with the viewing timezone it was made in.
    pub fn new(at: DateTime<Utc>, timezone: impl Into<String>) -> Self {
        Self {
            at,
            timezone: Some(timezone.into()),
        }
    }

    /// A legacy assignment with no recorded timezone.
    pub fn legacy(at: DateTime<Utc>) -> Self {
        Self { at, timezone: None }
    }
}

// ── Post status ─────────────────────────────────────────────────────────────

/// Where a post sits in its scheduling lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PostStatus {
    /// Not on the calendar.
    Draft,
    /// On the calendar and movable.
    Scheduled(SlotAssignment),
    /// On the calendar, already sent; blocks its hour but cannot be moved.
    Published(SlotAssignment),
}

// ── Post ────────────────────────────────────────────────────────────────────

/// A content post as seen by the scheduling core.
///
/// `content` is an opaque payload; the core never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    #[serde(flatten)]
    pub status: PostStatus,
    /// Creation instant, used only as a sort tie-break.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// The post's slot assignment, if it has one (scheduled or published).
    pub fn slot(&self) -> Option<&SlotAssignment> {
        match &self.status {
            PostStatus::Draft => None,
            PostStatus::Scheduled(slot) | PostStatus::Published(slot) => Some(slot),
        }
    }

    /// Whether drag-and-drop may move this post. Only `Scheduled` posts are
    /// movable; published posts stay pinned to the slot they went out in.
    pub fn is_draggable(&self) -> bool {
        matches!(self.status, PostStatus::Scheduled(_))
    }
}

// ── Viewing context ─────────────────────────────────────────────────────────

/// Which day begins a week on the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// The user's current calendar view settings.
///
/// Session-scoped configuration supplied by the host application (which also
/// owns persisting it between sessions). The core never reads ambient state;
/// every function takes the viewing timezone as an explicit argument, and
/// this struct exists so hosts have one serializable unit to pass around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewingContext {
    /// IANA timezone the calendar is currently rendered in.
    pub timezone: String,
    /// Which day starts the week in the week view.
    pub week_start: WeekStartDay,
}

impl ViewingContext {
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
            week_start: WeekStartDay::default(),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
