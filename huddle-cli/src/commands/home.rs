use anyhow::Result;
use huddle_core::constants::HOME_PREVIEW_LIMIT;
use huddle_core::query::{due_reminders, next_upcoming};
use huddle_core::settings::DefaultView;

use crate::app::App;
use crate::commands;
use crate::render::{reminder_message, render_event_line};

/// What `huddle` shows without a subcommand: the first due reminder, then
/// the preferred view.
pub fn run(app: &App) -> Result<()> {
    let theme = app.theme();
    let settings = app.settings.settings();

    if settings.notifications_enabled {
        let due = due_reminders(app.events.events(), app.now);
        if let Some(first) = due.first() {
            println!("{}", theme.info(&reminder_message(first)));
            println!();
        }
    }

    match settings.default_view {
        DefaultView::Calendar => {
            commands::calendar::run(app, None, 0)?;
        }
        DefaultView::List => {
            println!("{}", theme.heading("Upcoming Events"));
            let upcoming = next_upcoming(app.events.events(), app.now, HOME_PREVIEW_LIMIT);
            if upcoming.is_empty() {
                println!("{}", theme.muted("  No upcoming events. Suggest one with `huddle new`"));
            }
            for event in upcoming {
                println!("{}", render_event_line(event, &app.session.tz, &app.session.user, &theme));
            }
        }
    }

    Ok(())
}
