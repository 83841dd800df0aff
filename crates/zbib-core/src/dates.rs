//! Free-text date parsing
//!
//! Turns strings like "22 feb 1955", "1st of May 1215" or "today" into a
//! [`StructuredDate`]. Extraction is best-effort: unrecognized tokens are
//! skipped and whatever parts were found are returned, with `raw` always
//! preserving the input.

use chrono::{Datelike, Local};
use lazy_static::lazy_static;
use regex::Regex;
use zbib_domain::StructuredDate;

/// Month names, indexed by zero-based month
const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

lazy_static! {
    /// Day ordinals: "1st", "22nd", "3rd", "15th"
    static ref ORDINAL: Regex = Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)$").unwrap();
    /// Numeric ISO-style dates: "1965-08-01", "1965/8/1"
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})").unwrap();
}

/// Parse a free-text date into year/month/day parts.
///
/// Never fails; on garbage input only `raw` is set. `month` is
/// zero-based. Pure except for the wall clock behind "today".
pub fn parse_date(text: &str) -> StructuredDate {
    let mut date = StructuredDate::raw_only(text);
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case("today") {
        let now = Local::now();
        date.year = Some(now.year().to_string());
        date.month = Some(now.month0());
        date.day = Some(now.day());
        return date;
    }

    if let Some(caps) = NUMERIC_DATE.captures(trimmed) {
        date.year = Some(caps[1].to_string());
        if let (Ok(month), Ok(day)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) {
            if (1..=12).contains(&month) && (1..=31).contains(&day) {
                date.month = Some(month - 1);
                date.day = Some(day);
            }
        }
        return date;
    }

    for token in trimmed.split(|c: char| !c.is_ascii_alphanumeric()) {
        if token.is_empty() {
            continue;
        }
        if let Some(caps) = ORDINAL.captures(token) {
            if date.day.is_none() {
                date.day = caps[1].parse().ok();
            }
        } else if token.chars().all(|c| c.is_ascii_digit()) {
            if token.len() == 4 && date.year.is_none() {
                date.year = Some(token.to_string());
            } else if date.day.is_none() {
                if let Ok(day) = token.parse::<u32>() {
                    if day <= 31 {
                        date.day = Some(day);
                    }
                }
            }
        } else if date.month.is_none() {
            date.month = month_index(token);
        }
    }

    date
}

/// Match a full or abbreviated (>= 3 letters) month name, case-insensitive
fn month_index(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    let lowered = token.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|name| *name == lowered || name.starts_with(&lowered))
        .map(|index| index as u32)
}
