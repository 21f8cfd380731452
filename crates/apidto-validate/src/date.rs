//! Calendar date and ISO-8601 parsing used by the date rules and transforms.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
static ISO8601_REGEX: OnceLock<Regex> = OnceLock::new();

fn date_regex() -> &'static Regex {
    DATE_REGEX.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

fn iso8601_regex() -> &'static Regex {
    ISO8601_REGEX.get_or_init(|| {
        Regex::new(
            r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:[.,](\d+))?)?(Z|z|[+-]\d{2}(?::?\d{2})?)?)?$",
        )
        .unwrap()
    })
}

/// `yyyy-mm-dd` shape check only.
pub fn is_date_shaped(value: &str) -> bool {
    date_regex().is_match(value)
}

/// Parse a `yyyy-mm-dd` calendar date. Out-of-range days (`2011-02-30`)
/// are rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !is_date_shaped(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parse a strict ISO-8601 date or date-time in extended format.
///
/// A date without time is midnight UTC; a date-time without offset is
/// taken as UTC.
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    let caps = iso8601_regex().captures(value)?;
    let number = |i: usize| -> Option<u32> { caps.get(i).and_then(|m| m.as_str().parse().ok()) };

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?)?;

    let time = match caps.get(4) {
        None => NaiveTime::MIN,
        Some(_) => {
            let nanos = match caps.get(7) {
                Some(fraction) => {
                    let digits: String = fraction
                        .as_str()
                        .chars()
                        .chain(std::iter::repeat('0'))
                        .take(9)
                        .collect();
                    digits.parse().ok()?
                }
                None => 0,
            };
            NaiveTime::from_hms_nano_opt(number(4)?, number(5)?, number(6).unwrap_or(0), nanos)?
        }
    };

    let offset = match caps.get(8).map(|m| m.as_str()) {
        None | Some("Z") | Some("z") => FixedOffset::east_opt(0)?,
        Some(raw) => {
            let sign = if raw.starts_with('-') { -1 } else { 1 };
            let digits: String = raw[1..].chars().filter(char::is_ascii_digit).collect();
            let hours: i32 = digits.get(..2)?.parse().ok()?;
            let minutes: i32 = match digits.get(2..) {
                Some("") | None => 0,
                Some(m) => m.parse().ok()?,
            };
            if hours > 23 || minutes > 59 {
                return None;
            }
            FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?
        }
    };

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `yyyy-mm-dd` rendering of a date.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `yyyy-mm-ddTHH:MM:SS.mmmZ` rendering of a timestamp.
pub fn format_date_time(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
