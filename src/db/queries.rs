use rusqlite::{params, Connection};

use crate::models::{Appointment, DateSpec, TimeSpec};

/// True when no appointment occupies the `(date, time)` cell.
pub fn is_slot_free(
    conn: &Connection,
    date: &DateSpec,
    time: &TimeSpec,
) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE date = ?1 AND time = ?2",
        params![date.to_string(), time.to_string()],
        |row| row.get(0),
    )?;
    Ok(count == 0)
}

/// Claims the `(date, time)` cell. The unique index makes this a single
/// atomic check-and-write: a concurrent insert between an earlier
/// `is_slot_free` and this call loses cleanly instead of double-booking.
/// Returns false when the slot was already taken.
pub fn reserve_slot(
    conn: &Connection,
    date: &DateSpec,
    time: &TimeSpec,
) -> anyhow::Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO appointments (date, time) VALUES (?1, ?2)",
        params![date.to_string(), time.to_string()],
    )?;
    Ok(inserted > 0)
}

pub fn list_appointments(conn: &Connection) -> anyhow::Result<Vec<Appointment>> {
    let mut stmt =
        conn.prepare("SELECT id, date, time FROM appointments ORDER BY date, time")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut appointments = vec![];
    for row in rows {
        let (id, date, time) = row?;
        appointments.push(Appointment {
            id,
            date: date.parse()?,
            time: time.parse()?,
        });
    }
    Ok(appointments)
}

/// Appointment counts grouped by date, ordered by date.
pub fn appointments_per_date(conn: &Connection) -> anyhow::Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT date, COUNT(*) FROM appointments GROUP BY date ORDER BY date",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut summary = vec![];
    for row in rows {
        summary.push(row?);
    }
    Ok(summary)
}
