pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

/// Opens the calendar database and applies the schema. Re-running against
/// an existing database is a no-op.
pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS appointments (
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            UNIQUE(date, time)
        );",
    )
    .context("failed to create appointments table")?;

    Ok(conn)
}
