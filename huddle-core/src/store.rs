//! The canonical event list.
//!
//! Every successful mutation writes the whole list through to storage.
//! A failed write never rolls back the in-memory change: the store stays
//! authoritative for the session and the next mutation tries again.

use std::collections::HashSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::constants::EVENTS_KEY;
use crate::error::{HuddleError, HuddleResult};
use crate::event::{Event, EventDraft};
use crate::storage::{Storage, load_json, save_json};
use crate::user::Session;

pub struct EventStore<S: Storage> {
    events: Vec<Event>,
    storage: S,
    persist_error: Option<HuddleError>,
}

impl<S: Storage> EventStore<S> {
    /// Hydrate from storage, or seed the demo events (dated relative to
    /// `now`) when nothing usable is stored.
    pub fn open(storage: S, now: DateTime<Utc>) -> Self {
        let loaded = load_json::<Vec<Event>>(&storage, EVENTS_KEY).filter(|events| {
            match check_loaded(events) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "stored events are invalid, using defaults");
                    false
                }
            }
        });

        match loaded {
            Some(events) => {
                tracing::debug!(count = events.len(), "loaded events");
                Self::with_events(storage, events)
            }
            None => {
                tracing::debug!("no saved events, seeding demo data");
                let mut store = Self::with_events(storage, demo_events(now));
                store.persist();
                store
            }
        }
    }

    /// Use `events` as the initial list without touching storage.
    pub fn with_events(storage: S, events: Vec<Event>) -> Self {
        EventStore {
            events,
            storage,
            persist_error: None,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The last write failure, if any, cleared on read.
    pub fn take_persist_error(&mut self) -> Option<HuddleError> {
        self.persist_error.take()
    }

    // MUTATIONS:

    /// Create an event organized by the session user, who also becomes
    /// its first attendee.
    pub fn create<Tz: TimeZone>(
        &mut self,
        draft: EventDraft,
        session: &Session<Tz>,
    ) -> HuddleResult<Event> {
        let event = draft.into_event(self.fresh_id(), session)?;
        tracing::debug!(id = %event.id, title = %event.title, "created event");

        self.events.push(event.clone());
        self.persist();
        Ok(event)
    }

    /// Replace the stored record with the same id.
    ///
    /// The organizer can't be reassigned: `created_by` is carried over from
    /// the stored record.
    pub fn update(&mut self, mut event: Event) -> HuddleResult<Event> {
        event.validate()?;
        let index = self.position(&event.id)?;

        event.created_by = self.events[index].created_by.clone();
        self.events[index] = event.clone();
        tracing::debug!(id = %event.id, "updated event");

        self.persist();
        Ok(event)
    }

    /// Remove an event. Returns the removed record.
    pub fn delete(&mut self, id: &str) -> HuddleResult<Event> {
        let index = self.position(id)?;
        let removed = self.events.remove(index);
        tracing::debug!(id, "deleted event");

        self.persist();
        Ok(removed)
    }

    /// RSVP `user` to the event, or withdraw them if already attending.
    pub fn toggle_attendance(&mut self, id: &str, user: &str) -> HuddleResult<Event> {
        let index = self.position(id)?;
        let attending = self.events[index].toggle_attendee(user);
        tracing::debug!(id, user, attending, "toggled attendance");

        self.persist();
        Ok(self.events[index].clone())
    }

    /// Set the reminder `days` before the event, or clear it if already set.
    pub fn toggle_reminder(&mut self, id: &str, days: u32) -> HuddleResult<Event> {
        let index = self.position(id)?;
        let set = self.events[index].toggle_reminder(days)?;
        tracing::debug!(id, days, set, "toggled reminder");

        self.persist();
        Ok(self.events[index].clone())
    }

    // INTERNALS:

    fn position(&self, id: &str) -> HuddleResult<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| HuddleError::NotFound(id.to_string()))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        match save_json(&mut self.storage, EVENTS_KEY, &self.events) {
            Ok(()) => self.persist_error = None,
            Err(e) => {
                tracing::error!(error = %e, "failed to save events, keeping changes in memory");
                self.persist_error = Some(e);
            }
        }
    }
}

/// Every record must be valid on its own and ids must be unique.
fn check_loaded(events: &[Event]) -> HuddleResult<()> {
    let mut ids = HashSet::new();
    for event in events {
        event.validate()?;
        if !ids.insert(event.id.as_str()) {
            return Err(HuddleError::Validation(format!(
                "Duplicate event id '{}'",
                event.id
            )));
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn demo_event(
    id: &str,
    title: &str,
    description: &str,
    date: DateTime<Utc>,
    location: &str,
    created_by: &str,
    attendees: &[&str],
    reminders: &[u32],
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date,
        location: location.to_string(),
        created_by: created_by.to_string(),
        attendees: attendees.iter().map(|a| a.to_string()).collect(),
        reminders: reminders.iter().copied().collect(),
    }
}

/// Sample events shown on first launch, dated relative to `now`.
pub fn demo_events(now: DateTime<Utc>) -> Vec<Event> {
    vec![
        demo_event(
            "event1",
            "Team Lunch",
            "Monthly team lunch at the Italian restaurant",
            now + Duration::days(3),
            "Pasta Palace, Downtown",
            "user2",
            &["user1", "user2", "user3"],
            &[1, 3],
        ),
        demo_event(
            "event2",
            "Project Planning",
            "Quarterly planning session for Q3",
            now + Duration::days(7),
            "Conference Room A",
            "user1",
            &["user1", "user4", "user5"],
            &[1],
        ),
        demo_event(
            "event3",
            "Movie Night",
            "Watching the new sci-fi movie at Cinema City",
            now + Duration::days(10),
            "Cinema City, Mall",
            "user3",
            &["user3", "user5"],
            &[2],
        ),
        demo_event(
            "event4",
            "Birthday Party",
            "Celebrating Alex's birthday",
            now - Duration::days(2),
            "Rooftop Bar",
            "user4",
            &["user1", "user2", "user3", "user4", "user5"],
            &[1, 7],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::collections::BTreeSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn empty_store() -> EventStore<MemoryStorage> {
        EventStore::with_events(MemoryStorage::new(), Vec::new())
    }

    fn session() -> Session<Utc> {
        Session::new("user1", Utc)
    }

    /// Storage that refuses every write.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> HuddleResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> HuddleResult<()> {
            Err(HuddleError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn create_then_delete_empties_store() {
        let mut store = empty_store();
        let event = store
            .create(EventDraft::new("Lunch", "2024-06-10T12:00:00Z"), &session())
            .unwrap();

        assert!(!event.id.is_empty());
        assert_eq!(event.created_by, "user1");
        assert_eq!(event.attendees, vec!["user1"]);
        assert_eq!(store.len(), 1);

        store.delete(&event.id).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn created_ids_are_unique() {
        let mut store = empty_store();
        let a = store.create(EventDraft::new("A", "2024-06-10"), &session()).unwrap();
        let b = store.create(EventDraft::new("B", "2024-06-10"), &session()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn invalid_drafts_leave_store_untouched() {
        let mut store = empty_store();
        let blank = store.create(EventDraft::new(" ", "2024-06-10"), &session());
        let bad_date = store.create(EventDraft::new("Lunch", "tomorrowish"), &session());

        assert!(matches!(blank, Err(HuddleError::Validation(_))));
        assert!(matches!(bad_date, Err(HuddleError::Validation(_))));
        assert!(store.is_empty());
        assert_eq!(store.storage().get(EVENTS_KEY).unwrap(), None);
    }

    #[test]
    fn missing_ids_are_not_found_everywhere() {
        let mut store = EventStore::with_events(MemoryStorage::new(), demo_events(now()));
        let mut ghost = demo_events(now()).remove(0);
        ghost.id = "ghost".to_string();

        assert!(matches!(store.update(ghost), Err(HuddleError::NotFound(_))));
        assert!(matches!(store.delete("ghost"), Err(HuddleError::NotFound(_))));
        assert!(matches!(
            store.toggle_attendance("ghost", "user1"),
            Err(HuddleError::NotFound(_))
        ));
        assert!(matches!(
            store.toggle_reminder("ghost", 1),
            Err(HuddleError::NotFound(_))
        ));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn update_replaces_record_but_keeps_organizer() {
        let mut store = EventStore::with_events(MemoryStorage::new(), demo_events(now()));
        let mut edited = store.get("event2").unwrap().clone();
        edited.title = "Roadmap Review".to_string();
        edited.created_by = "user5".to_string();

        let updated = store.update(edited).unwrap();
        assert_eq!(updated.title, "Roadmap Review");
        assert_eq!(updated.created_by, "user1");
        assert_eq!(store.get("event2").unwrap(), &updated);
    }

    #[test]
    fn update_rejects_blank_title() {
        let mut store = EventStore::with_events(MemoryStorage::new(), demo_events(now()));
        let mut edited = store.get("event1").unwrap().clone();
        edited.title = String::new();
        assert!(matches!(store.update(edited), Err(HuddleError::Validation(_))));
        assert_eq!(store.get("event1").unwrap().title, "Team Lunch");
    }

    #[test]
    fn toggle_attendance_twice_restores_attendees() {
        let mut store = EventStore::with_events(MemoryStorage::new(), demo_events(now()));
        let original = store.get("event3").unwrap().attendees.clone();

        let joined = store.toggle_attendance("event3", "user1").unwrap();
        assert_eq!(joined.attendees, vec!["user3", "user5", "user1"]);

        let left = store.toggle_attendance("event3", "user1").unwrap();
        assert_eq!(left.attendees, original);
    }

    #[test]
    fn creator_can_rsvp_out() {
        let mut store = empty_store();
        let event = store.create(EventDraft::new("Hike", "2024-06-20"), &session()).unwrap();
        let event = store.toggle_attendance(&event.id, "user1").unwrap();
        assert!(event.attendees.is_empty());
        assert_eq!(event.created_by, "user1");
    }

    #[test]
    fn toggle_reminder_twice_restores_reminders() {
        let mut store = EventStore::with_events(MemoryStorage::new(), demo_events(now()));

        let set = store.toggle_reminder("event1", 7).unwrap();
        assert_eq!(set.reminders, BTreeSet::from([1, 3, 7]));

        let cleared = store.toggle_reminder("event1", 7).unwrap();
        assert_eq!(cleared.reminders, BTreeSet::from([1, 3]));
    }

    #[test]
    fn mutations_write_through() {
        let mut storage = MemoryStorage::new();
        {
            let mut store = EventStore::with_events(&mut storage, Vec::new());
            store
                .create(EventDraft::new("Lunch", "2024-06-10T12:00:00Z"), &session())
                .unwrap();
        }

        let reopened = EventStore::open(&mut storage, now());
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.events()[0].title, "Lunch");
    }

    #[test]
    fn open_seeds_demo_events_when_empty() {
        let mut storage = MemoryStorage::new();
        {
            let store = EventStore::open(&mut storage, now());
            assert_eq!(store.len(), 4);
            assert_eq!(store.get("event1").unwrap().date, now() + Duration::days(3));
        }
        assert!(storage.get(EVENTS_KEY).unwrap().is_some());
    }

    #[test]
    fn open_falls_back_to_demo_events_when_corrupt() {
        let mut storage = MemoryStorage::new();
        storage.set(EVENTS_KEY, "[{\"id\": 42").unwrap();

        let store = EventStore::open(storage, now());
        assert_eq!(store.len(), 4);
    }

    fn stored_event(id: &str, title: &str, attendees: &str, reminders: &str) -> String {
        format!(
            r#"{{"id":"{}","title":"{}","date":"2024-06-10T12:00:00Z","createdBy":"user1","attendees":{},"reminders":{}}}"#,
            id, title, attendees, reminders
        )
    }

    fn open_stored(records: &[String]) -> EventStore<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage
            .set(EVENTS_KEY, &format!("[{}]", records.join(",")))
            .unwrap();
        EventStore::open(storage, now())
    }

    #[test]
    fn valid_stored_events_load_as_is() {
        let store = open_stored(&[
            stored_event("a", "Lunch", r#"["user1"]"#, "[1]"),
            stored_event("b", "Hike", r#"["user2","user1"]"#, "[]"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("b").unwrap().attendees, vec!["user2", "user1"]);
    }

    #[test]
    fn stored_blank_title_falls_back_to_demo_events() {
        let store = open_stored(&[stored_event("a", "   ", r#"["user1"]"#, "[1]")]);
        assert_eq!(store.len(), 4);
        assert!(store.get("a").is_none());
    }

    #[test]
    fn stored_zero_reminder_falls_back_to_demo_events() {
        let store = open_stored(&[stored_event("a", "Lunch", r#"["user1"]"#, "[0, 1]")]);
        assert_eq!(store.len(), 4);
        assert!(store.get("a").is_none());
    }

    #[test]
    fn stored_repeated_attendee_falls_back_to_demo_events() {
        let store = open_stored(&[stored_event("a", "Lunch", r#"["user1","user1"]"#, "[]")]);
        assert_eq!(store.len(), 4);
        assert!(store.get("a").is_none());
    }

    #[test]
    fn stored_duplicate_ids_fall_back_to_demo_events() {
        let store = open_stored(&[
            stored_event("a", "Lunch", r#"["user1"]"#, "[]"),
            stored_event("a", "Dup", r#"["user2"]"#, "[]"),
        ]);
        assert_eq!(store.len(), 4);
        assert!(store.get("a").is_none());
    }

    #[test]
    fn saved_empty_list_is_not_reseeded() {
        let mut storage = MemoryStorage::new();
        storage.set(EVENTS_KEY, "[]").unwrap();

        let store = EventStore::open(storage, now());
        assert!(store.is_empty());
    }

    #[test]
    fn persisted_list_roundtrips_field_for_field() {
        let events = demo_events(now());
        let mut storage = MemoryStorage::new();
        save_json(&mut storage, EVENTS_KEY, &events).unwrap();

        let store = EventStore::open(storage, now() + Duration::days(30));
        assert_eq!(store.events(), events.as_slice());
    }

    #[test]
    fn failed_writes_keep_memory_authoritative() {
        let mut store = EventStore::with_events(ReadOnlyStorage, Vec::new());
        let event = store
            .create(EventDraft::new("Lunch", "2024-06-10"), &session())
            .unwrap();

        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.take_persist_error(),
            Some(HuddleError::Persistence(_))
        ));
        assert!(store.take_persist_error().is_none());

        store.toggle_reminder(&event.id, 2).unwrap();
        assert!(store.get(&event.id).unwrap().has_reminder(2));
        assert!(store.take_persist_error().is_some());
    }
}
