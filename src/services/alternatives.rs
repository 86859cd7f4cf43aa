use chrono::Duration;

use crate::models::{DateSpec, TimeSpec};
use crate::services::oracle::{OracleError, SlotOracle};

pub const DEFAULT_MAX_ALTERNATIVES: usize = 2;

/// Proposes up to `max_alternatives` open times near a busy slot.
///
/// For each offset `i` in `1..=max_alternatives`, the slot `i` hours after
/// the requested time is probed first, then `i` hours before. Collected
/// times are then sorted chronologically and truncated, so a
/// later-discovered but earlier-in-the-day slot can displace one found
/// first. Offsets that cross midnight wrap to a time-of-day probed against
/// the requested date; there is no day-rollover correction.
pub async fn find_alternatives(
    oracle: &dyn SlotOracle,
    date: &DateSpec,
    requested: &TimeSpec,
    max_alternatives: usize,
) -> Result<Vec<TimeSpec>, OracleError> {
    let mut alternatives: Vec<TimeSpec> = Vec::new();
    let requested_dt = date.date().and_time(requested.time());

    for i in 1..=max_alternatives as i64 {
        let after = TimeSpec::new((requested_dt + Duration::hours(i)).time());
        if !alternatives.contains(&after) && oracle.is_free(date, &after).await? {
            alternatives.push(after);
        }

        let before = TimeSpec::new((requested_dt - Duration::hours(i)).time());
        if !alternatives.contains(&before) && oracle.is_free(date, &before).await? {
            alternatives.push(before);
        }
    }

    alternatives.sort();
    alternatives.truncate(max_alternatives);
    Ok(alternatives)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::db::{self, queries};
    use crate::services::oracle::sqlite::SqliteOracle;

    fn setup() -> (SqliteOracle, Arc<Mutex<rusqlite::Connection>>) {
        let conn = Arc::new(Mutex::new(db::init_db(":memory:").unwrap()));
        (SqliteOracle::new(Arc::clone(&conn)), conn)
    }

    fn book(conn: &Arc<Mutex<rusqlite::Connection>>, date: &str, time: &str) {
        let db = conn.lock().unwrap();
        queries::reserve_slot(&db, &date.parse().unwrap(), &time.parse().unwrap()).unwrap();
    }

    async fn alternatives(oracle: &SqliteOracle, time: &str, max: usize) -> Vec<String> {
        find_alternatives(
            oracle,
            &"2025-08-08".parse().unwrap(),
            &time.parse().unwrap(),
            max,
        )
        .await
        .unwrap()
        .iter()
        .map(TimeSpec::to_string)
        .collect()
    }

    #[tokio::test]
    async fn empty_calendar_offers_earliest_two() {
        let (oracle, _conn) = setup();

        // Discovery order is 16:00, 14:00, 17:00, 13:00; the sort and
        // truncate keep the two chronologically earliest.
        assert_eq!(alternatives(&oracle, "15:00", 2).await, ["13:00", "14:00"]);
    }

    #[tokio::test]
    async fn busy_neighbors_are_skipped() {
        let (oracle, conn) = setup();
        book(&conn, "2025-08-08", "14:00");
        book(&conn, "2025-08-08", "13:00");

        assert_eq!(alternatives(&oracle, "15:00", 2).await, ["16:00", "17:00"]);
    }

    #[tokio::test]
    async fn partial_availability_mixes_sides() {
        let (oracle, conn) = setup();
        book(&conn, "2025-08-08", "14:00");

        // Free candidates in discovery order: 16:00, 17:00, 13:00.
        assert_eq!(alternatives(&oracle, "15:00", 2).await, ["13:00", "16:00"]);
    }

    #[tokio::test]
    async fn fully_booked_neighborhood_yields_nothing() {
        let (oracle, conn) = setup();
        for t in ["13:00", "14:00", "16:00", "17:00"] {
            book(&conn, "2025-08-08", t);
        }

        assert!(alternatives(&oracle, "15:00", 2).await.is_empty());
    }

    #[tokio::test]
    async fn offsets_crossing_midnight_wrap_to_time_of_day() {
        let (oracle, _conn) = setup();

        // 01:00 probes 02:00, 00:00, 03:00, then 23:00 (wrapped); the two
        // chronologically earliest survive.
        assert_eq!(alternatives(&oracle, "01:00", 2).await, ["00:00", "02:00"]);
    }

    #[tokio::test]
    async fn minutes_are_preserved() {
        let (oracle, _conn) = setup();

        assert_eq!(alternatives(&oracle, "15:30", 2).await, ["13:30", "14:30"]);
    }

    #[tokio::test]
    async fn wider_search_respects_truncation() {
        let (oracle, conn) = setup();
        book(&conn, "2025-08-08", "13:00");
        book(&conn, "2025-08-08", "14:00");

        // Free candidates in discovery order: 16:00, 17:00, 18:00, 12:00;
        // after the sort the three earliest are kept.
        assert_eq!(
            alternatives(&oracle, "15:00", 3).await,
            ["12:00", "16:00", "17:00"]
        );
    }
}
