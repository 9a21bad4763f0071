//! Display and reminder preferences.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REMINDER_DAYS, SETTINGS_KEY};
use crate::error::{HuddleError, HuddleResult};
use crate::event::EventDraft;
use crate::storage::{Storage, load_json, save_json};

/// Which view a front end opens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Calendar,
    List,
}

impl fmt::Display for DefaultView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DefaultView::Calendar => write!(f, "calendar"),
            DefaultView::List => write!(f, "list"),
        }
    }
}

impl FromStr for DefaultView {
    type Err = HuddleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calendar" => Ok(DefaultView::Calendar),
            "list" => Ok(DefaultView::List),
            other => Err(HuddleError::Validation(format!(
                "Unknown view '{}'. Expected 'calendar' or 'list'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dark_mode: bool,
    pub default_view: DefaultView,
    /// Reminder offsets pre-selected for new events
    pub default_reminder_days: BTreeSet<u32>,
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dark_mode: false,
            default_view: DefaultView::Calendar,
            default_reminder_days: DEFAULT_REMINDER_DAYS.into_iter().collect(),
            notifications_enabled: true,
        }
    }
}

impl Settings {
    /// Start a draft with the default reminders already selected.
    pub fn draft(&self, title: impl Into<String>, date: impl Into<String>) -> EventDraft {
        EventDraft::new(title, date).with_reminders(self.default_reminder_days.iter().copied())
    }
}

/// Settings plus the storage they're saved to. Every setter saves immediately.
pub struct SettingsStore<S: Storage> {
    settings: Settings,
    storage: S,
    persist_error: Option<HuddleError>,
}

impl<S: Storage> SettingsStore<S> {
    /// Load saved settings, falling back to defaults when absent or corrupt.
    pub fn open(storage: S) -> Self {
        let settings: Settings = load_json(&storage, SETTINGS_KEY).unwrap_or_default();
        SettingsStore {
            settings,
            storage,
            persist_error: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn take_persist_error(&mut self) -> Option<HuddleError> {
        self.persist_error.take()
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> &Settings {
        self.settings.dark_mode = enabled;
        self.persist()
    }

    pub fn set_default_view(&mut self, view: DefaultView) -> &Settings {
        self.settings.default_view = view;
        self.persist()
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) -> &Settings {
        self.settings.notifications_enabled = enabled;
        self.persist()
    }

    /// Add or remove a default reminder offset.
    pub fn toggle_default_reminder(&mut self, days: u32) -> HuddleResult<&Settings> {
        if days == 0 {
            return Err(HuddleError::Validation(
                "Reminders must be at least 1 day before the event".into(),
            ));
        }
        if !self.settings.default_reminder_days.remove(&days) {
            self.settings.default_reminder_days.insert(days);
        }
        Ok(self.persist())
    }

    fn persist(&mut self) -> &Settings {
        tracing::debug!(settings = ?self.settings, "saving settings");
        match save_json(&mut self.storage, SETTINGS_KEY, &self.settings) {
            Ok(()) => self.persist_error = None,
            Err(e) => {
                tracing::error!(error = %e, "failed to save settings, keeping changes in memory");
                self.persist_error = Some(e);
            }
        }
        &self.settings
    }
}
