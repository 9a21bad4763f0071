//! The event record and the draft callers fill in to create one.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::date::{day_of, parse_event_date};
use crate::error::{HuddleError, HuddleResult};
use crate::user::{Session, UserId};

/// A planned occurrence with an organizer, attendees and reminder offsets.
///
/// Serialized with camelCase field names (`createdBy`), the same shape
/// the persisted event list uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The instant the event happens. Compare calendar days with [`Event::day_in`].
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    pub created_by: UserId,
    /// In RSVP order, without duplicates
    #[serde(default)]
    pub attendees: Vec<UserId>,
    /// Days-before-event offsets
    #[serde(default)]
    pub reminders: BTreeSet<u32>,
}

impl Event {
    pub fn is_attending(&self, user: &str) -> bool {
        self.attendees.iter().any(|a| a == user)
    }

    pub fn has_reminder(&self, days: u32) -> bool {
        self.reminders.contains(&days)
    }

    /// The calendar day this event falls on in `tz`.
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        day_of(&self.date, tz)
    }

    /// Add or remove `user` from the attendees. Returns whether they now attend.
    pub fn toggle_attendee(&mut self, user: &str) -> bool {
        if self.is_attending(user) {
            self.attendees.retain(|a| a != user);
            false
        } else {
            self.attendees.push(user.to_string());
            true
        }
    }

    /// Add or remove a reminder offset. Returns whether it is now set.
    pub fn toggle_reminder(&mut self, days: u32) -> HuddleResult<bool> {
        check_reminder_days(days)?;
        if self.reminders.remove(&days) {
            Ok(false)
        } else {
            self.reminders.insert(days);
            Ok(true)
        }
    }

    pub fn validate(&self) -> HuddleResult<()> {
        check_title(&self.title)?;
        check_reminders(&self.reminders)?;
        check_attendees(&self.attendees)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Input for creating an event. The store assigns the id, the organizer
/// and the initial attendee list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    /// Parsed when the event is created; see [`parse_event_date`] for accepted forms
    pub date: String,
    pub location: String,
    pub reminders: BTreeSet<u32>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        EventDraft {
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_reminders(mut self, days: impl IntoIterator<Item = u32>) -> Self {
        self.reminders = days.into_iter().collect();
        self
    }

    /// Validate the draft and turn it into a record organized by the session user.
    /// The organizer starts out as the only attendee.
    pub(crate) fn into_event<Tz: TimeZone>(
        self,
        id: String,
        session: &Session<Tz>,
    ) -> HuddleResult<Event> {
        check_title(&self.title)?;
        check_reminders(&self.reminders)?;
        let date = parse_event_date(&self.date, &session.tz)?;

        Ok(Event {
            id,
            title: self.title,
            description: self.description,
            date,
            location: self.location,
            created_by: session.user.clone(),
            attendees: vec![session.user.clone()],
            reminders: self.reminders,
        })
    }
}

fn check_title(title: &str) -> HuddleResult<()> {
    if title.trim().is_empty() {
        return Err(HuddleError::Validation(
            "Please enter an event title".into(),
        ));
    }
    Ok(())
}

fn check_reminder_days(days: u32) -> HuddleResult<()> {
    if days == 0 {
        return Err(HuddleError::Validation(
            "Reminders must be at least 1 day before the event".into(),
        ));
    }
    Ok(())
}

fn check_reminders(reminders: &BTreeSet<u32>) -> HuddleResult<()> {
    reminders.iter().try_for_each(|d| check_reminder_days(*d))
}

fn check_attendees(attendees: &[UserId]) -> HuddleResult<()> {
    let mut seen = HashSet::new();
    match attendees.iter().find(|a| !seen.insert(a.as_str())) {
        Some(dup) => Err(HuddleError::Validation(format!(
            "'{}' is listed as attending more than once",
            dup
        ))),
        None => Ok(()),
    }
}
