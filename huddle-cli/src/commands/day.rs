use anyhow::Result;
use huddle_core::query::events_on_day_in;

use crate::app::App;
use crate::input::parse_day;
use crate::render::{format_date_label, render_event_details};

pub fn run(app: &App, day: &str) -> Result<()> {
    let theme = app.theme();
    let day = parse_day(day, app.now, &app.session.tz)?;
    let events = events_on_day_in(app.events.events(), day, &app.session.tz);

    println!("{}", theme.heading(&format_date_label(day, app.today())));

    if events.is_empty() {
        println!("{}", theme.muted("  Nothing planned. Add something with `huddle new`"));
        return Ok(());
    }

    for event in events {
        println!();
        for line in render_event_details(event, &app.session.tz, &app.roster, &theme) {
            println!("  {}", line);
        }
    }

    Ok(())
}
