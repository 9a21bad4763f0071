//! Core of huddle, a group event planner.
//!
//! This crate holds everything that isn't presentation:
//! - `store`: the canonical event list with create/update/delete and RSVP/reminder toggles
//! - `query`: pure calendar, upcoming-list and due-reminder questions over that list
//! - `settings`: display and reminder preferences
//! - `storage`: the key-value blob store both of the above persist to
//! - `user`: the fixed roster and the explicit session (acting user + time zone)

pub mod constants;
pub mod date;
pub mod error;
pub mod event;
pub mod query;
pub mod settings;
pub mod storage;
pub mod store;
pub mod user;

pub use error::{HuddleError, HuddleResult};
pub use event::{Event, EventDraft};
pub use settings::{DefaultView, Settings, SettingsStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::EventStore;
pub use user::{Roster, Session, User, UserId};
