/// Storage key for the serialized event list.
pub const EVENTS_KEY: &str = "events";

/// Storage key for the serialized settings.
pub const SETTINGS_KEY: &str = "settings";

/// Reminder offsets (in days) that front ends offer as presets.
pub const REMINDER_CHOICES: [u32; 4] = [1, 3, 5, 7];

/// Reminder offsets used when no settings have been saved yet.
pub const DEFAULT_REMINDER_DAYS: [u32; 2] = [1, 3];

/// How many upcoming events the home preview shows.
pub const HOME_PREVIEW_LIMIT: usize = 3;

/// How many upcoming events the events tab shows.
pub const UPCOMING_LIMIT: usize = 5;

pub(crate) const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
