//! Everything a command needs: config, the acting session, and both stores.

use std::io::IsTerminal;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use huddle_core::{Event, EventStore, FileStorage, Roster, Session, SettingsStore};

use crate::config::HuddleConfig;
use crate::render::{Theme, short_id};

pub struct App {
    pub config: HuddleConfig,
    pub roster: Roster,
    pub session: Session<Tz>,
    pub events: EventStore<FileStorage>,
    pub settings: SettingsStore<FileStorage>,
    pub now: DateTime<Utc>,
}

impl App {
    /// Load config and stores, acting as `acting_user` or the configured profile.
    pub fn load(acting_user: Option<&str>) -> Result<Self> {
        let config = HuddleConfig::load()?;
        let now = Utc::now();

        let roster = Roster::demo();
        let user = acting_user.unwrap_or(&config.current_user);
        let session = roster.session(user, config.time_zone()?)?;
        tracing::debug!(user = %session.user, tz = %session.tz.name(), "acting session");

        let storage = FileStorage::new(config.data_path());
        tracing::debug!(dir = %storage.dir().display(), "opening stores");
        let events = EventStore::open(storage.clone(), now);
        let settings = SettingsStore::open(storage);

        Ok(App {
            config,
            roster,
            session,
            events,
            settings,
            now,
        })
    }

    /// Colors follow the dark-mode setting; piped output gets none.
    pub fn theme(&self) -> Theme {
        if std::io::stdout().is_terminal() {
            Theme::new(self.settings.settings().dark_mode)
        } else {
            Theme::plain()
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.session.tz).date_naive()
    }

    /// Find an event by id or by an unambiguous id prefix.
    pub fn find_event(&self, id: &str) -> Result<&Event> {
        if let Some(event) = self.events.get(id) {
            return Ok(event);
        }

        let matches: Vec<&Event> = self
            .events
            .events()
            .iter()
            .filter(|e| e.id.starts_with(id))
            .collect();

        match matches.as_slice() {
            [event] => Ok(*event),
            [] => anyhow::bail!("Event '{}' not found", id),
            many => {
                let ids: Vec<_> = many.iter().map(|e| short_id(&e.id)).collect();
                anyhow::bail!("'{}' matches several events: {}", id, ids.join(", "))
            }
        }
    }

    /// Warn about writes that didn't reach disk. The changes still apply
    /// for the rest of this run.
    pub fn report_persist_errors(&mut self) {
        let theme = self.theme();
        let failures = [
            self.events.take_persist_error(),
            self.settings.take_persist_error(),
        ];
        for error in failures.into_iter().flatten() {
            eprintln!("{}", theme.error(&format!("Warning: {}", error)));
        }
    }
}
