use anyhow::Result;
use huddle_core::query::due_reminders;

use crate::app::App;
use crate::render::{reminder_message, short_id};

/// Print reminders due right now.
///
/// Nothing is remembered between runs: asking again on the same day shows
/// the same reminders.
pub fn run(app: &App) -> Result<()> {
    let theme = app.theme();

    if !app.settings.settings().notifications_enabled {
        println!(
            "{}",
            theme.muted("Notifications are disabled. Turn them on with `huddle settings --notifications true`")
        );
        return Ok(());
    }

    let due = due_reminders(app.events.events(), app.now);
    if due.is_empty() {
        println!("{}", theme.muted("No reminders due"));
        return Ok(());
    }

    for reminder in &due {
        println!(
            "{} {}",
            theme.info(&reminder_message(reminder)),
            theme.muted(&format!("[{}]", short_id(&reminder.event.id)))
        );
    }

    Ok(())
}
