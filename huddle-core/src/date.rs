//! Parsing user-supplied event dates and projecting instants to calendar days.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{HuddleError, HuddleResult};

/// Wall-clock forms, interpreted in the caller's time zone.
const LOCAL_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an event date into the canonical instant.
///
/// Accepts:
/// - RFC 3339 instants ("2024-06-10T12:00:00Z", "2024-06-10T14:00:00+02:00")
/// - wall-clock date-times ("2024-06-10T14:00"), read in `tz`
/// - plain dates ("2024-06-10"), read as the start of that day in `tz`
pub fn parse_event_date<Tz: TimeZone>(input: &str, tz: &Tz) -> HuddleResult<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(HuddleError::Validation(
            "Please choose a date for the event".into(),
        ));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(&naive, tz, input);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return local_to_utc(&date.and_time(NaiveTime::MIN), tz, input);
    }

    Err(HuddleError::Validation(format!(
        "Invalid date '{}'. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or an RFC 3339 timestamp",
        input
    )))
}

/// Project an instant onto the calendar day it falls on in `tz`.
pub fn day_of<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant.
fn local_to_utc<Tz: TimeZone>(
    naive: &NaiveDateTime,
    tz: &Tz,
    input: &str,
) -> HuddleResult<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            HuddleError::Validation(format!("'{}' does not exist in this time zone", input))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::America::New_York;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_event_date("2024-06-10T14:00:00+02:00", &Utc).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn rfc3339_ignores_session_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let parsed = parse_event_date("2024-06-10T12:00:00Z", &tokyo).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn wall_clock_is_read_in_session_zone() {
        let parsed = parse_event_date("2024-06-10T09:30", &New_York).unwrap();
        // EDT is UTC-4 in June
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 10, 13, 30, 0).unwrap());
    }

    #[test]
    fn plain_date_is_start_of_local_day() {
        let parsed = parse_event_date("2024-01-15", &New_York).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 5, 0, 0).unwrap());
        assert_eq!(
            day_of(&parsed, &New_York),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(
            parse_event_date("   ", &Utc),
            Err(HuddleError::Validation(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            parse_event_date("next blursday", &Utc),
            Err(HuddleError::Validation(_))
        ));
        assert!(matches!(
            parse_event_date("2024-02-30", &Utc),
            Err(HuddleError::Validation(_))
        ));
    }

    #[test]
    fn skipped_wall_clock_time_is_rejected() {
        // Clocks jump from 02:00 to 03:00 on this day
        let result = parse_event_date("2024-03-10T02:30", &New_York);
        assert!(matches!(result, Err(HuddleError::Validation(_))));
    }

    #[test]
    fn day_of_depends_on_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 11, 2, 0, 0).unwrap();
        assert_eq!(day_of(&instant, &Utc), NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        assert_eq!(
            day_of(&instant, &New_York),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
    }
}
