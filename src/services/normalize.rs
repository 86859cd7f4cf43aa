use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::models::{DateSpec, TimeSpec};

// Fixed scan order: a phrase naming several weekdays or months resolves to
// whichever is listed first here.
const WEEKDAYS: [(&str, i64); 7] = [
    ("monday", 0),
    ("tuesday", 1),
    ("wednesday", 2),
    ("thursday", 3),
    ("friday", 4),
    ("saturday", 5),
    ("sunday", 6),
];

const MONTHS: [(&str, u32); 12] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

fn day_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2})\b").expect("failed to compile day number regex"))
}

fn hm_ampm_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2}):(\d{2})\s*(am|pm)").expect("failed to compile am/pm time regex")
    })
}

fn hour_ampm_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})\s*(am|pm)").expect("failed to compile am/pm hour regex")
    })
}

fn hm_24_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("failed to compile 24-hour time regex")
    })
}

/// Converts a free-form date phrase to a canonical date, relative to `today`.
///
/// Rules are tried in priority order, first match wins: "today", "tomorrow",
/// a weekday name (with "next"/"this" qualifiers), then a month name plus a
/// day number. Returns `None` when nothing matches; callers treat that as
/// "could not extract a date", not as an error.
pub fn normalize_date(phrase: &str, today: NaiveDate) -> Option<DateSpec> {
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() {
        return None;
    }

    if phrase.contains("today") {
        return Some(DateSpec::new(today));
    }

    if phrase.contains("tomorrow") {
        return Some(DateSpec::new(today + Duration::days(1)));
    }

    for (name, target_weekday) in WEEKDAYS {
        if !phrase.contains(name) {
            continue;
        }

        let current_weekday = today.weekday().num_days_from_monday() as i64;
        let mut days_ahead = target_weekday - current_weekday;

        if phrase.contains("next") {
            // "next friday" always skips a week beyond the nearest occurrence.
            days_ahead += 7;
        } else if days_ahead <= 0 {
            // "this friday" and bare "friday" stay in the current week unless
            // the day has already passed.
            days_ahead += 7;
        }

        return Some(DateSpec::new(today + Duration::days(days_ahead)));
    }

    for (name, month) in MONTHS {
        if !phrase.contains(name) {
            continue;
        }

        if let Some(caps) = day_number_re().captures(&phrase) {
            let day: u32 = caps[1].parse().ok()?;
            if let Some(date) = DateSpec::from_ymd(today.year(), month, day) {
                return Some(date);
            }
            // Invalid calendar date (e.g. "february 31") falls through.
        }
    }

    None
}

/// Converts a free-form time phrase to a canonical 24-hour time.
///
/// Tries `H:MM am/pm` first, then `H am/pm` (minutes default to 00), then
/// plain 24-hour `H:MM`. Returns `None` for anything unparseable or out of
/// range; never errors.
pub fn normalize_time(phrase: &str) -> Option<TimeSpec> {
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() {
        return None;
    }

    if phrase.contains("am") || phrase.contains("pm") {
        if let Some(caps) = hm_ampm_re().captures(&phrase) {
            let hour: u32 = caps[1].parse().ok()?;
            let minute: u32 = caps[2].parse().ok()?;
            return TimeSpec::from_hm(to_24_hour(hour, &caps[3]), minute);
        }

        if let Some(caps) = hour_ampm_re().captures(&phrase) {
            let hour: u32 = caps[1].parse().ok()?;
            return TimeSpec::from_hm(to_24_hour(hour, &caps[2]), 0);
        }
    }

    let caps = hm_24_re().captures(&phrase)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour > 23 {
        return None;
    }
    TimeSpec::from_hm(hour, minute)
}

fn to_24_hour(hour: u32, period: &str) -> u32 {
    match (period, hour) {
        ("pm", h) if h != 12 => h + 12,
        ("am", 12) => 0,
        (_, h) => h,
    }
}
