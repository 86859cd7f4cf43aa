use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical calendar date, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateSpec(NaiveDate);

impl DateSpec {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a date from components, `None` for invalid calendar dates
    /// (e.g. day 31 in a 30-day month).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateSpec {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

impl Serialize for DateSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Canonical 24-hour wall-clock time, rendered as `HH:MM`.
///
/// Ordering is chronological, which for the canonical form is the same as
/// lexicographic order on the rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpec(NaiveTime);

impl TimeSpec {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Builds a time from components, `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeSpec {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M").map(Self)
    }
}

impl Serialize for TimeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// What the user is asking for. Anything we don't recognize stays `Unknown`
/// and gets the fixed unsupported-intent reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Intent {
    #[serde(rename = "book_appointment")]
    Book,
    #[serde(other)]
    Unknown,
}

/// One utterance, reduced to canonical parts. Produced fresh per message,
/// never mutated.
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    pub intent: Intent,
    pub date: Option<DateSpec>,
    pub time: Option<TimeSpec>,
}

/// Alternative slots presented after a busy result, labeled for quick
/// selection. `date` is the originally requested date; every entry was
/// free when the offer was built but may have gone stale since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOffer {
    pub date: DateSpec,
    pub choices: Vec<(char, TimeSpec)>,
}

impl SlotOffer {
    pub fn time_for_label(&self, label: char) -> Option<TimeSpec> {
        self.choices
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, t)| *t)
    }

    pub fn contains_time(&self, time: TimeSpec) -> bool {
        self.choices.iter().any(|(_, t)| *t == time)
    }
}

/// A booked slot as stored in the calendar.
#[derive(Debug, Clone, Serialize)]
pub struct Appointment {
    pub id: i64,
    pub date: DateSpec,
    pub time: TimeSpec,
}

/// Terminal result of one booking attempt. Every variant maps to exactly
/// one user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Booked {
        date: DateSpec,
        time: TimeSpec,
    },
    BusyWithAlternatives {
        date: DateSpec,
        time: TimeSpec,
        alternatives: Vec<TimeSpec>,
    },
    BusyNoAlternatives {
        date: DateSpec,
        time: TimeSpec,
    },
    ReserveFailed {
        date: DateSpec,
        time: TimeSpec,
        reason: Option<String>,
    },
    TransportError {
        reason: String,
    },
    MalformedResponse {
        reason: String,
    },
    UnsupportedIntent,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Booked { .. })
    }

    /// Renders the single user-facing message for this outcome.
    ///
    /// The `BusyWithAlternatives` form is a contract, not just display text:
    /// the negotiation engine re-extracts the times by scanning for
    /// `"alternative times: "` up to the closing `?`.
    pub fn message(&self) -> String {
        match self {
            Outcome::Booked { date, time } => {
                format!("Appointment on {date} at {time} booked successfully.")
            }
            Outcome::BusyWithAlternatives {
                date,
                time,
                alternatives,
            } => {
                let joined = alternatives
                    .iter()
                    .map(TimeSpec::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{date} at {time} is not available. \
                     Would you like to book one of these alternative times: {joined}?"
                )
            }
            Outcome::BusyNoAlternatives { date, time } => {
                format!(
                    "{date} at {time} is not available, \
                     and there are no alternative times available."
                )
            }
            Outcome::ReserveFailed { reason, .. } => reason
                .clone()
                .unwrap_or_else(|| "Failed to book appointment.".to_string()),
            Outcome::TransportError { reason } => {
                format!("Failed to check availability: {reason}")
            }
            Outcome::MalformedResponse { reason } => {
                format!("Failed to parse availability response: {reason}")
            }
            Outcome::UnsupportedIntent => {
                "I'm sorry, I don't know how to handle that request intent.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeSpec {
        s.parse().unwrap()
    }

    #[test]
    fn canonical_forms_round_trip() {
        let date: DateSpec = "2025-08-08".parse().unwrap();
        assert_eq!(date.to_string(), "2025-08-08");

        let time: TimeSpec = "09:05".parse().unwrap();
        assert_eq!(time.to_string(), "09:05");

        assert!("8/8/2025".parse::<DateSpec>().is_err());
        assert!("25:00".parse::<TimeSpec>().is_err());
        assert!("15:00:00".parse::<TimeSpec>().is_err());
    }

    #[test]
    fn time_ordering_is_chronological() {
        let mut times = vec![t("16:00"), t("09:00"), t("13:30")];
        times.sort();
        assert_eq!(times, vec![t("09:00"), t("13:30"), t("16:00")]);
    }

    #[test]
    fn intent_wire_form() {
        #[derive(Deserialize)]
        struct Probe {
            intent: Intent,
        }

        let p: Probe = serde_json::from_str(r#"{"intent":"book_appointment"}"#).unwrap();
        assert_eq!(p.intent, Intent::Book);

        let p: Probe = serde_json::from_str(r#"{"intent":"cancel_appointment"}"#).unwrap();
        assert_eq!(p.intent, Intent::Unknown);
    }

    #[test]
    fn busy_message_embeds_times_in_order() {
        let outcome = Outcome::BusyWithAlternatives {
            date: "2025-08-08".parse().unwrap(),
            time: t("15:00"),
            alternatives: vec![t("13:00"), t("14:00")],
        };
        assert_eq!(
            outcome.message(),
            "2025-08-08 at 15:00 is not available. \
             Would you like to book one of these alternative times: 13:00, 14:00?"
        );
    }
}
