use anyhow::Result;

use crate::app::App;
use crate::render::pluralize;

pub fn run(app: &mut App, id: &str, days: u32) -> Result<()> {
    let theme = app.theme();
    let id = app.find_event(id)?.id.clone();

    let event = app.events.toggle_reminder(&id, days)?;

    let state = if event.has_reminder(days) { "set" } else { "removed" };
    println!(
        "{}",
        theme.accent(&format!(
            "Reminder {} for {} {} before the event",
            state,
            days,
            pluralize("day", days as usize)
        ))
    );

    Ok(())
}
