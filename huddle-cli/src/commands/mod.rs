pub mod calendar;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod events;
pub mod home;
pub mod new;
pub mod remind;
pub mod reminders;
pub mod rsvp;
pub mod settings;
pub mod users;
