use anyhow::Result;

use crate::app::App;
use crate::input::normalize_event_date;
use crate::render::short_id;

pub struct NewEvent {
    pub title: String,
    pub date: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub reminders: Vec<u32>,
}

pub fn run(app: &mut App, args: NewEvent) -> Result<()> {
    let theme = app.theme();

    // Same default as the form: today, with the default reminders selected
    let date = match args.date {
        Some(input) => normalize_event_date(&input, app.now, &app.session.tz),
        None => app.today().format("%Y-%m-%d").to_string(),
    };

    let mut draft = app.settings.settings().draft(args.title, date);
    if !args.reminders.is_empty() {
        draft = draft.with_reminders(args.reminders);
    }
    if let Some(description) = args.description {
        draft = draft.with_description(description);
    }
    if let Some(location) = args.location {
        draft = draft.with_location(location);
    }

    let event = app.events.create(draft, &app.session)?;

    println!("{}", theme.accent("Event created successfully!"));
    println!(
        "  {} {}",
        event.title,
        theme.muted(&format!("[{}]", short_id(&event.id)))
    );

    Ok(())
}
