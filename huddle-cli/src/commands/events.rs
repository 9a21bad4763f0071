use anyhow::Result;
use chrono::{DateTime, Utc};
use huddle_core::Event;
use huddle_core::constants::UPCOMING_LIMIT;
use huddle_core::query::{all_events_by_date, upcoming_events};

use crate::app::App;
use crate::render::{format_date_label, render_event_line};

/// Which events to list. `limit` only applies to upcoming events and is
/// taken after the `mine` filter.
fn select_events<'a>(
    events: &'a [Event],
    now: DateTime<Utc>,
    user: &str,
    all: bool,
    mine: bool,
    limit: Option<usize>,
) -> Vec<&'a Event> {
    let mut listed = if all {
        all_events_by_date(events)
    } else {
        upcoming_events(events, now)
    };
    if mine {
        listed.retain(|e| e.is_attending(user));
    }
    if !all {
        listed.truncate(limit.unwrap_or(UPCOMING_LIMIT));
    }
    listed
}

pub fn run(app: &App, all: bool, mine: bool, limit: Option<usize>) -> Result<()> {
    let theme = app.theme();
    let user = app.session.user.as_str();
    let listed = select_events(app.events.events(), app.now, user, all, mine, limit);

    if listed.is_empty() {
        let hint = if all {
            "No events found. Create your first event with `huddle new`"
        } else {
            "No upcoming events. Suggest one with `huddle new`"
        };
        println!("{}", theme.muted(hint));
        return Ok(());
    }

    // Group events by day and print
    let today = app.today();
    let mut current_day = None;

    for event in listed {
        let day = event.day_in(&app.session.tz);

        if current_day != Some(day) {
            if current_day.is_some() {
                println!();
            }
            println!("{}", theme.heading(&format_date_label(day, today)));
            current_day = Some(day);
        }

        println!("{}", render_event_line(event, &app.session.tz, user, &theme));
    }

    Ok(())
}
