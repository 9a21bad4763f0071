use anyhow::Result;
use chrono::Datelike;
use huddle_core::query::{shift_month, upcoming_events};

use crate::app::App;
use crate::input::parse_month;
use crate::render::{render_event_line, render_month_grid};

pub fn run(app: &App, month: Option<&str>, offset: i32) -> Result<()> {
    let theme = app.theme();
    let anchor = match month {
        Some(m) => parse_month(m)?,
        None => app.today(),
    };
    let anchor = shift_month(anchor, offset)
        .ok_or_else(|| anyhow::anyhow!("Month is out of range"))?;

    let tz = &app.session.tz;
    let events = app.events.events();

    for line in render_month_grid(anchor, events, tz, app.today(), &theme) {
        println!("{}", line);
    }

    // Remaining events in the shown month
    let in_month: Vec<_> = upcoming_events(events, app.now)
        .into_iter()
        .filter(|e| {
            let day = e.day_in(tz);
            day.year() == anchor.year() && day.month() == anchor.month()
        })
        .collect();

    if !in_month.is_empty() {
        println!();
        for event in in_month {
            let label = event.day_in(tz).format("%a %-d").to_string();
            println!(
                "{} {}",
                theme.muted(&format!("{:>7}", label)),
                render_event_line(event, tz, &app.session.user, &theme).trim_start()
            );
        }
    }

    Ok(())
}
