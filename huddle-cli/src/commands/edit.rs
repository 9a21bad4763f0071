use anyhow::Result;
use huddle_core::date::parse_event_date;

use crate::app::App;
use crate::input::normalize_event_date;

#[derive(Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.location.is_none()
    }
}

pub fn run(app: &mut App, id: &str, changes: EventChanges) -> Result<()> {
    let theme = app.theme();

    if changes.is_empty() {
        anyhow::bail!("Nothing to change. Pass --title, --date, --description or --location");
    }

    // Updates replace the whole record, so start from the stored one
    let mut event = app.find_event(id)?.clone();

    if let Some(title) = changes.title {
        event.title = title;
    }
    if let Some(input) = changes.date {
        let normalized = normalize_event_date(&input, app.now, &app.session.tz);
        event.date = parse_event_date(&normalized, &app.session.tz)?;
    }
    if let Some(description) = changes.description {
        event.description = description;
    }
    if let Some(location) = changes.location {
        event.location = location;
    }

    let event = app.events.update(event)?;
    println!("{}", theme.accent(&format!("Updated: {}", event.title)));

    Ok(())
}
