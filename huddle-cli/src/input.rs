//! Turning loose command-line date input into forms the core understands.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use huddle_core::date::parse_event_date;

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let lower = input.to_lowercase();
    lower
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if the user's input contains a time of day (am/pm, HH:MM, noon, midnight, "at 3").
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let bytes = lower.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        // "6pm", "6 pm", "11am"
        if (b == b'a' || b == b'p') && bytes.get(i + 1) == Some(&b'm') {
            if i > 0 && bytes[i - 1].is_ascii_digit() {
                return true;
            }
            if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                return true;
            }
        }

        // "15:30"
        if b == b':' {
            let digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let digit_after = bytes.get(i + 1).is_some_and(|c| c.is_ascii_digit());
            if digit_before && digit_after {
                return true;
            }
        }
    }

    let after_at = lower
        .find(" at ")
        .map(|pos| &lower[pos + 4..])
        .or_else(|| lower.strip_prefix("at "));
    after_at.is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Resolve natural language against `now` as seen in `tz`, so "today"
/// is the session's today rather than the system's.
fn fuzzy_wall_clock<Tz: TimeZone>(
    input: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<NaiveDateTime, fuzzydate::Error> {
    fuzzydate::aware_parse(
        expand_abbreviations(input),
        Some(now.with_timezone(tz)),
        tz.clone(),
    )
    .map(|dt| dt.naive_local())
}

/// Normalize a date the user typed for an event.
///
/// Strict forms (2024-06-10, 2024-06-10T15:00, RFC 3339) pass through
/// unchanged. Natural language ("tomorrow 3pm", "sat") is resolved with
/// fuzzydate into a wall-clock date-time in `tz`; without a time of day it
/// becomes the start of that day. Anything else is passed on as typed so
/// the event store can reject it with its own message.
pub fn normalize_event_date<Tz: TimeZone>(input: &str, now: DateTime<Utc>, tz: &Tz) -> String {
    if parse_event_date(input, tz).is_ok() {
        return input.trim().to_string();
    }

    match fuzzy_wall_clock(input, now, tz) {
        Ok(dt) => {
            let wall_clock = if has_time_component(input) {
                dt
            } else {
                dt.date().and_time(NaiveTime::MIN)
            };
            wall_clock.format("%Y-%m-%dT%H:%M:%S").to_string()
        }
        Err(_) => input.to_string(),
    }
}

/// Parse a calendar day: YYYY-MM-DD, or natural language ("today", "next friday")
/// relative to `now` in `tz`.
pub fn parse_day<Tz: TimeZone>(input: &str, now: DateTime<Utc>, tz: &Tz) -> Result<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(day);
    }
    fuzzy_wall_clock(input, now, tz)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))
}

/// Parse a month as YYYY-MM. Returns the first day of that month.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", input))
}
