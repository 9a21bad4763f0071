//! Calendar, upcoming-list and reminder queries over an event snapshot.
//!
//! Everything here is pure: the current instant is always a parameter and
//! the event list is never modified. Calendar-day questions take the time
//! zone used to project instants onto days; the un-suffixed variants use
//! the process's local zone.

use std::iter::FusedIterator;

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, TimeZone, Utc};

use crate::constants::MILLIS_PER_DAY;
use crate::event::Event;

// DAY QUERIES:

/// Events whose date falls on `day` when projected into `tz`.
pub fn events_on_day_in<'a, Tz: TimeZone>(
    events: &'a [Event],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Event> {
    events.iter().filter(|e| e.day_in(tz) == day).collect()
}

/// Events on `day` in the local time zone.
pub fn events_on_day(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    events_on_day_in(events, day, &Local)
}

pub fn has_events_on_day_in<Tz: TimeZone>(events: &[Event], day: NaiveDate, tz: &Tz) -> bool {
    events.iter().any(|e| e.day_in(tz) == day)
}

pub fn has_events_on_day(events: &[Event], day: NaiveDate) -> bool {
    has_events_on_day_in(events, day, &Local)
}

// LISTS:

/// Events at or after `now`, soonest first. Events at the same instant
/// keep their list order.
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|e| e.date >= now).collect();
    upcoming.sort_by_key(|e| e.date);
    upcoming
}

/// The first `limit` upcoming events.
pub fn next_upcoming(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<&Event> {
    let mut upcoming = upcoming_events(events, now);
    upcoming.truncate(limit);
    upcoming
}

/// Every event, past ones included, oldest first.
pub fn all_events_by_date(events: &[Event]) -> Vec<&Event> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
}

/// Events `user` has RSVP'd to, in list order.
pub fn events_attended_by<'a>(events: &'a [Event], user: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| e.is_attending(user)).collect()
}

// REMINDERS:

/// An event whose reminder offset matches the days left until it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueReminder<'a> {
    pub event: &'a Event,
    pub days_until: i64,
}

/// Whole days from `now` until `date`, rounded up. A partial day counts
/// as a full one; dates in the past give zero or less.
pub fn days_until(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (date - now).num_milliseconds();
    -(-millis).div_euclid(MILLIS_PER_DAY)
}

/// Reminders due at `now`.
///
/// This is a snapshot: asking twice on the same day reports the same
/// reminders twice. Suppressing repeats is up to the caller.
pub fn due_reminders(events: &[Event], now: DateTime<Utc>) -> Vec<DueReminder<'_>> {
    events
        .iter()
        .filter_map(|event| {
            let days = days_until(event.date, now);
            let offset = u32::try_from(days).ok().filter(|d| *d > 0)?;
            event.has_reminder(offset).then_some(DueReminder {
                event,
                days_until: days,
            })
        })
        .collect()
}

// MONTH GRID:

/// The days of one month in ascending order.
///
/// Lazy and finite; clone it to walk the month again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthDays {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for MonthDays {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let day = self.next?;
        self.next = if day < self.last { day.succ_opt() } else { None };
        Some(day)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map(|day| usize::try_from((self.last - day).num_days() + 1).unwrap_or(0))
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthDays {}

impl FusedIterator for MonthDays {}

/// Every day of the month containing `anchor`, first to last.
pub fn days_in_month_grid(anchor: NaiveDate) -> MonthDays {
    MonthDays {
        next: Some(first_of_month(anchor)),
        last: last_of_month(anchor),
    }
}

pub fn first_of_month(anchor: NaiveDate) -> NaiveDate {
    anchor - Days::new(u64::from(anchor.day0()))
}

pub fn last_of_month(anchor: NaiveDate) -> NaiveDate {
    first_of_month(anchor)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// The first day of the month `delta` months away from `anchor`'s month.
/// Negative deltas go back in time.
pub fn shift_month(anchor: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let first = first_of_month(anchor);
    let months = Months::new(delta.unsigned_abs());
    if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    }
}

/// Empty cells before the first of the month in a Sunday-first grid.
pub fn leading_blank_days(anchor: NaiveDate) -> u32 {
    first_of_month(anchor).weekday().num_days_from_sunday()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::demo_events;
    use chrono::{Duration, FixedOffset};
    use chrono_tz::America::Los_Angeles;
    use chrono_tz::Asia::Tokyo;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_at(id: &str, at: DateTime<Utc>, reminders: &[u32]) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            description: String::new(),
            date: at,
            location: String::new(),
            created_by: "user1".to_string(),
            attendees: vec!["user1".to_string()],
            reminders: reminders.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    fn ids<'a>(events: &[&'a Event]) -> Vec<&'a str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn every_event_is_found_on_its_own_day() {
        let events = demo_events(now());
        let plus_five = FixedOffset::east_opt(5 * 3600).unwrap();

        for event in &events {
            assert!(events_on_day_in(&events, event.day_in(&Utc), &Utc).contains(&event));
            assert!(events_on_day_in(&events, event.day_in(&Tokyo), &Tokyo).contains(&event));
            assert!(
                events_on_day_in(&events, event.day_in(&plus_five), &plus_five).contains(&event)
            );
            assert!(events_on_day(&events, event.day_in(&Local)).contains(&event));
        }
    }

    #[test]
    fn groups_events_by_calendar_day() {
        let events = vec![
            event_at("a", Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(), &[]),
            event_at("b", Utc.with_ymd_and_hms(2024, 6, 11, 12, 0, 0).unwrap(), &[]),
            event_at("c", Utc.with_ymd_and_hms(2024, 6, 10, 18, 30, 0).unwrap(), &[]),
        ];

        let on_tenth = events_on_day_in(&events, date(2024, 6, 10), &Utc);
        assert_eq!(ids(&on_tenth), vec!["a", "c"]);
        assert!(has_events_on_day_in(&events, date(2024, 6, 11), &Utc));
        assert!(!has_events_on_day_in(&events, date(2024, 6, 12), &Utc));
    }

    #[test]
    fn day_boundaries_follow_the_time_zone() {
        // 30 minutes apart, but on either side of midnight in UTC
        let events = vec![
            event_at("late", Utc.with_ymd_and_hms(2024, 6, 10, 23, 45, 0).unwrap(), &[]),
            event_at("early", Utc.with_ymd_and_hms(2024, 6, 11, 0, 15, 0).unwrap(), &[]),
        ];

        assert_eq!(ids(&events_on_day_in(&events, date(2024, 6, 10), &Utc)), vec!["late"]);
        assert_eq!(ids(&events_on_day_in(&events, date(2024, 6, 11), &Utc)), vec!["early"]);

        // Both are on the afternoon of June 10 in Los Angeles
        assert_eq!(
            ids(&events_on_day_in(&events, date(2024, 6, 10), &Los_Angeles)),
            vec!["late", "early"]
        );
    }

    #[test]
    fn empty_list_answers_everything_with_nothing() {
        let events: Vec<Event> = Vec::new();
        assert!(events_on_day_in(&events, date(2024, 6, 10), &Utc).is_empty());
        assert!(!has_events_on_day(&events, date(2024, 6, 10)));
        assert!(upcoming_events(&events, now()).is_empty());
        assert!(due_reminders(&events, now()).is_empty());
        assert!(all_events_by_date(&events).is_empty());
    }

    #[test]
    fn upcoming_is_sorted_and_excludes_past() {
        let events = demo_events(now());
        let upcoming = upcoming_events(&events, now());

        assert_eq!(ids(&upcoming), vec!["event1", "event2", "event3"]);
        assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn upcoming_includes_now_and_keeps_tie_order() {
        let events = vec![
            event_at("later", now() + Duration::hours(2), &[]),
            event_at("tie-1", now(), &[]),
            event_at("past", now() - Duration::seconds(1), &[]),
            event_at("tie-2", now(), &[]),
        ];

        let upcoming = upcoming_events(&events, now());
        assert_eq!(ids(&upcoming), vec!["tie-1", "tie-2", "later"]);
    }

    #[test]
    fn next_upcoming_limits_results() {
        let events = demo_events(now());
        assert_eq!(ids(&next_upcoming(&events, now(), 2)), vec!["event1", "event2"]);
        assert_eq!(next_upcoming(&events, now(), 10).len(), 3);
    }

    #[test]
    fn all_events_by_date_includes_past() {
        let events = demo_events(now());
        let all = all_events_by_date(&events);
        assert_eq!(ids(&all), vec!["event4", "event1", "event2", "event3"]);
    }

    #[test]
    fn attended_events_filter_by_user() {
        let events = demo_events(now());
        assert_eq!(
            ids(&events_attended_by(&events, "user5")),
            vec!["event2", "event3", "event4"]
        );
        assert!(events_attended_by(&events, "nobody").is_empty());
    }

    #[test]
    fn days_until_rounds_up() {
        assert_eq!(days_until(now() + Duration::days(3), now()), 3);
        assert_eq!(days_until(now() + Duration::hours(60), now()), 3);
        assert_eq!(days_until(now() + Duration::milliseconds(1), now()), 1);
        assert_eq!(days_until(now(), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(12), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(36), now()), -1);
    }

    #[test]
    fn reminder_due_when_offset_matches() {
        let events = vec![event_at("lunch", now() + Duration::days(3), &[1, 3])];
        let due = due_reminders(&events, now());

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].event.id, "lunch");
        assert_eq!(due[0].days_until, 3);
    }

    #[test]
    fn partial_day_rounds_up_to_the_next_reminder() {
        let at = now() + Duration::days(2) + Duration::milliseconds(1);
        assert_eq!(days_until(at, now()), 3);

        let events = vec![event_at("soon", at, &[3])];
        let due = due_reminders(&events, now());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].days_until, 3);

        let events = vec![event_at("soon", at, &[2])];
        assert!(due_reminders(&events, now()).is_empty());
    }

    #[test]
    fn reminder_not_due_without_matching_offset() {
        let events = vec![event_at("lunch", now() + Duration::days(3), &[1])];
        assert!(due_reminders(&events, now()).is_empty());
    }

    #[test]
    fn past_and_current_events_never_have_due_reminders() {
        let events = vec![
            event_at("now", now(), &[1]),
            event_at("past", now() - Duration::days(1), &[1]),
        ];
        assert!(due_reminders(&events, now()).is_empty());
    }

    #[test]
    fn demo_data_has_one_due_reminder_on_launch() {
        let events = demo_events(now());
        let due = due_reminders(&events, now());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].event.title, "Team Lunch");
        assert_eq!(due[0].days_until, 3);
    }

    #[test]
    fn month_grid_covers_whole_month() {
        let days: Vec<_> = days_in_month_grid(date(2024, 6, 17)).collect();
        assert_eq!(days.len(), 30);
        assert_eq!(days.first(), Some(&date(2024, 6, 1)));
        assert_eq!(days.last(), Some(&date(2024, 6, 30)));
        assert!(days.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
    }

    #[test]
    fn month_grid_handles_month_lengths() {
        assert_eq!(days_in_month_grid(date(2024, 2, 10)).count(), 29);
        assert_eq!(days_in_month_grid(date(2023, 2, 28)).count(), 28);
        assert_eq!(days_in_month_grid(date(2024, 12, 31)).last(), Some(date(2024, 12, 31)));
    }

    #[test]
    fn month_grid_is_restartable_and_sized() {
        let mut grid = days_in_month_grid(date(2024, 4, 1));
        assert_eq!(grid.len(), 30);

        let again = grid.clone();
        grid.next();
        assert_eq!(grid.len(), 29);
        assert_eq!(again.count(), 30);

        let mut exhausted = grid.skip(29);
        assert_eq!(exhausted.next(), None);
        assert_eq!(exhausted.next(), None);
    }

    #[test]
    fn shift_month_moves_to_first_of_month() {
        assert_eq!(shift_month(date(2024, 1, 31), 1), Some(date(2024, 2, 1)));
        assert_eq!(shift_month(date(2024, 1, 31), -1), Some(date(2023, 12, 1)));
        assert_eq!(shift_month(date(2024, 3, 15), 0), Some(date(2024, 3, 1)));
        assert_eq!(shift_month(date(2024, 11, 5), 14), Some(date(2026, 1, 1)));
    }

    #[test]
    fn leading_blanks_match_weekday_of_first() {
        // June 1, 2024 is a Saturday; September 1, 2024 a Sunday
        assert_eq!(leading_blank_days(date(2024, 6, 20)), 6);
        assert_eq!(leading_blank_days(date(2024, 9, 9)), 0);
        assert_eq!(last_of_month(date(2024, 9, 9)), date(2024, 9, 30));
    }
}
