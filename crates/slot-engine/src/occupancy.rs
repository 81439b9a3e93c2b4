//! Per-day slot occupancy, computed in the viewing timezone.
//!
//! The index reports which hours of a calendar day are already claimed. It
//! reports fact and nothing more: if two posts already share an hour, the
//! set still contains that hour once — enforcing uniqueness is the best-slot
//! search's job, not the index's.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::post::Post;
use crate::timezone::{local_date_and_hour, viewing_instant};

/// The hours of `day` (0-23, local to the viewing timezone) occupied by
/// posts holding a slot assignment.
///
/// A day is defined by calendar-date equality in the viewing timezone, not
/// by a 24-hour window from midnight UTC — a post at 03:00 UTC can belong to
/// the previous day when viewed from Los Angeles.
///
/// Both scheduled and published posts count: publishing pins a post to its
/// slot without freeing the hour for reassignment. Drafts contribute
/// nothing.
///
/// `exclude_post_id` removes a single post's own contribution; it is passed
/// when rescheduling, so a post dropped elsewhere on the same day does not
/// conflict with itself.
pub fn occupied_hours(
    posts: &[Post],
    day: NaiveDate,
    viewing_timezone: &str,
    exclude_post_id: Option<&str>,
) -> BTreeSet<u32> {
    posts
        .iter()
        .filter(|post| exclude_post_id != Some(post.id.as_str()))
        .filter_map(|post| post.slot().map(|slot| viewing_instant(slot, viewing_timezone)))
        .filter_map(|instant| {
            let (date, hour) = local_date_and_hour(instant, viewing_timezone);
            (date == day).then_some(hour)
        })
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{PostStatus, SlotAssignment};
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn scheduled(id: &str, at: DateTime<Utc>, zone: &str) -> Post {
        Post {
            id: id.into(),
            content: String::new(),
            status: PostStatus::Scheduled(SlotAssignment::new(at, zone)),
            created_at: utc(2024, 1, 1, 0),
        }
    }

    fn day(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    #[test]
    fn test_duplicate_hours_collapse() {
        // Hours {9, 14, 14}: two posts share 14, set semantics collapse it.
        let posts = vec![
            scheduled("a", utc(2024, 6, 10, 9), "UTC"),
            scheduled("b", utc(2024, 6, 10, 14), "UTC"),
            scheduled("c", utc(2024, 6, 10, 14), "UTC"),
        ];
        let occupied = occupied_hours(&posts, day(2024, 6, 10), "UTC", None);
        assert_eq!(occupied, BTreeSet::from([9, 14]));
    }

    #[test]
    fn test_exclude_removes_only_that_posts_contribution() {
        let posts = vec![
            scheduled("a", utc(2024, 6, 10, 9), "UTC"),
            scheduled("b", utc(2024, 6, 10, 14), "UTC"),
            scheduled("c", utc(2024, 6, 10, 14), "UTC"),
        ];
        // Excluding "b" still leaves "c" claiming hour 14.
        let occupied = occupied_hours(&posts, day(2024, 6, 10), "UTC", Some("b"));
        assert_eq!(occupied, BTreeSet::from([9, 14]));
        // Excluding "a" frees hour 9.
        let occupied = occupied_hours(&posts, day(2024, 6, 10), "UTC", Some("a"));
        assert_eq!(occupied, BTreeSet::from([14]));
    }

    #[test]
    fn test_other_days_do_not_contribute() {
        let posts = vec![
            scheduled("a", utc(2024, 6, 10, 9), "UTC"),
            scheduled("b", utc(2024, 6, 11, 10), "UTC"),
        ];
        let occupied = occupied_hours(&posts, day(2024, 6, 10), "UTC", None);
        assert_eq!(occupied, BTreeSet::from([9]));
    }

    #[test]
    fn test_day_membership_follows_viewing_timezone() {
        // 03:00 UTC on June 10 is 20:00 on June *9* in Los Angeles.
        let posts = vec![scheduled("a", utc(2024, 6, 10, 3), "UTC")];
        // Stored zone is UTC, viewing in UTC: belongs to June 10.
        assert_eq!(
            occupied_hours(&posts, day(2024, 6, 10), "UTC", None),
            BTreeSet::from([3])
        );

        // A legacy post (no stored zone) viewed from Los Angeles lands on
        // June 9 at hour 20.
        let legacy = vec![Post {
            id: "l".into(),
            content: String::new(),
            status: PostStatus::Scheduled(SlotAssignment::legacy(utc(2024, 6, 10, 3))),
            created_at: utc(2024, 1, 1, 0),
        }];
        assert_eq!(
            occupied_hours(&legacy, day(2024, 6, 9), "America/Los_Angeles", None),
            BTreeSet::from([20])
        );
        assert!(occupied_hours(&legacy, day(2024, 6, 10), "America/Los_Angeles", None).is_empty());
    }

    #[test]
    fn test_drafts_contribute_nothing() {
        let posts = vec![Post {
            id: "d".into(),
            content: String::new(),
            status: PostStatus::Draft,
            created_at: utc(2024, 1, 1, 0),
        }];
        assert!(occupied_hours(&posts, day(2024, 6, 10), "UTC", None).is_empty());
    }

    #[test]
    fn test_published_posts_still_occupy_their_hour() {
        let posts = vec![Post {
            id: "p".into(),
            content: String::new(),
            status: PostStatus::Published(SlotAssignment::new(utc(2024, 6, 10, 11), "UTC")),
            created_at: utc(2024, 1, 1, 0),
        }];
        assert_eq!(
            occupied_hours(&posts, day(2024, 6, 10), "UTC", None),
            BTreeSet::from([11])
        );
    }

    #[test]
    fn test_cross_zone_post_occupies_its_wall_clock_hour() {
        // Scheduled for 09:00 in New York; viewed from London it keeps the
        // 09:00 digits, so it occupies hour 9 of the same calendar day.
        let posts = vec![scheduled("a", utc(2024, 6, 10, 13), "America/New_York")];
        assert_eq!(
            occupied_hours(&posts, day(2024, 6, 10), "Europe/London", None),
            BTreeSet::from([9])
        );
    }
}
