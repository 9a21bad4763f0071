//! Terminal rendering for huddle types.
//!
//! Colors come from a [`Theme`] picked from the dark-mode setting; a plain
//! theme renders the same layout without escape codes.

use chrono::{NaiveDate, TimeZone};
use huddle_core::Event;
use huddle_core::query::{DueReminder, days_in_month_grid, has_events_on_day_in, leading_blank_days};
use huddle_core::user::Roster;
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    dark: bool,
    color: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Theme { dark, color: true }
    }

    /// No colors at all.
    pub fn plain() -> Self {
        Theme {
            dark: false,
            color: false,
        }
    }

    pub fn heading(&self, text: &str) -> String {
        match (self.color, self.dark) {
            (false, _) => text.to_string(),
            (true, true) => text.bold().bright_white().to_string(),
            (true, false) => text.bold().to_string(),
        }
    }

    pub fn accent(&self, text: &str) -> String {
        match (self.color, self.dark) {
            (false, _) => text.to_string(),
            (true, true) => text.bright_green().to_string(),
            (true, false) => text.green().to_string(),
        }
    }

    pub fn muted(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn info(&self, text: &str) -> String {
        match (self.color, self.dark) {
            (false, _) => text.to_string(),
            (true, true) => text.bright_cyan().to_string(),
            (true, false) => text.blue().to_string(),
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Ids are uuids; the first block is enough to type them back.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d, %Y").to_string(),
    }
}

/// One line per event: time, title, attendee count, and whether `user` is going.
pub fn render_event_line<Tz: TimeZone>(
    event: &Event,
    tz: &Tz,
    user: &str,
    theme: &Theme,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let time = event.date.with_timezone(tz).format("%H:%M").to_string();
    let count = event.attendees.len();
    let attendees = format!("{} {}", count, pluralize("attendee", count));
    let going = if event.is_attending(user) {
        format!(" {}", theme.accent("✓ going"))
    } else {
        String::new()
    };

    format!(
        "  {:>5} {} {}{} {}",
        time,
        event.title,
        theme.muted(&format!("({})", attendees)),
        going,
        theme.muted(&format!("[{}]", short_id(&event.id)))
    )
}

/// Full details for a single event.
pub fn render_event_details<Tz: TimeZone>(
    event: &Event,
    tz: &Tz,
    roster: &Roster,
    theme: &Theme,
) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut lines = vec![theme.heading(&event.title)];
    let when = event.date.with_timezone(tz).format("%A, %B %-d, %Y at %H:%M");
    lines.push(format!("  {} {}", theme.muted("When:     "), when));

    if !event.location.is_empty() {
        lines.push(format!("  {} {}", theme.muted("Where:    "), event.location));
    }
    if !event.description.is_empty() {
        lines.push(format!("  {} {}", theme.muted("About:    "), event.description));
    }

    lines.push(format!(
        "  {} {}",
        theme.muted("Organizer:"),
        roster.get_or_default(&event.created_by).name
    ));

    let attendees = if event.attendees.is_empty() {
        theme.muted("No attendees yet")
    } else {
        event
            .attendees
            .iter()
            .map(|id| roster.get_or_default(id).name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    lines.push(format!(
        "  {} {}",
        theme.muted(&format!("Attendees ({}):", event.attendees.len())),
        attendees
    ));

    let reminders = if event.reminders.is_empty() {
        theme.muted("none")
    } else {
        event
            .reminders
            .iter()
            .map(|d| format!("{} {} before", d, pluralize("day", *d as usize)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    lines.push(format!("  {} {}", theme.muted("Reminders:"), reminders));
    lines.push(format!("  {} {}", theme.muted("Id:       "), event.id));

    lines
}

/// Sunday-first month grid. Days with events are marked with `*`, today
/// is bracketed.
pub fn render_month_grid<Tz: TimeZone>(
    anchor: NaiveDate,
    events: &[Event],
    tz: &Tz,
    today: NaiveDate,
    theme: &Theme,
) -> Vec<String> {
    let mut lines = vec![
        theme.heading(&anchor.format("%B %Y").to_string()),
        theme.muted(" Sun  Mon  Tue  Wed  Thu  Fri  Sat"),
    ];

    let mut cells: Vec<String> = (0..leading_blank_days(anchor))
        .map(|_| "     ".to_string())
        .collect();

    for day in days_in_month_grid(anchor) {
        let marked = has_events_on_day_in(events, day, tz);
        let label = day.format("%-d").to_string();
        let cell = match (day == today, marked) {
            (true, true) => format!("[{:>2}*]", label),
            (true, false) => format!("[{:>2}] ", label),
            (false, true) => format!(" {:>2}* ", label),
            (false, false) => format!(" {:>2}  ", label),
        };

        let cell = if marked {
            theme.accent(&cell)
        } else {
            cell
        };
        cells.push(cell);
    }

    for week in cells.chunks(7) {
        lines.push(week.join("").trim_end().to_string());
    }

    lines
}

/// The notification text for a due reminder.
pub fn reminder_message(due: &DueReminder) -> String {
    let days = due.days_until.unsigned_abs() as usize;
    format!(
        "Reminder: \"{}\" is in {} {}!",
        due.event.title,
        due.days_until,
        pluralize("day", days)
    )
}
