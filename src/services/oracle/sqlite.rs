use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;

use super::{OracleError, Reservation, SlotOracle};
use crate::db::queries;
use crate::models::{DateSpec, TimeSpec};

/// Calendar backed by the process-local SQLite database.
pub struct SqliteOracle {
    db: Arc<Mutex<Connection>>,
}

impl SqliteOracle {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SlotOracle for SqliteOracle {
    async fn is_free(&self, date: &DateSpec, time: &TimeSpec) -> Result<bool, OracleError> {
        let db = self.db.lock().unwrap();
        queries::is_slot_free(&db, date, time).map_err(|e| OracleError::Database(e.to_string()))
    }

    async fn reserve(
        &self,
        date: &DateSpec,
        time: &TimeSpec,
    ) -> Result<Reservation, OracleError> {
        let db = self.db.lock().unwrap();
        let reserved = queries::reserve_slot(&db, date, time)
            .map_err(|e| OracleError::Database(e.to_string()))?;

        if reserved {
            Ok(Reservation {
                success: true,
                reason: None,
            })
        } else {
            // Lost the slot between check and reserve; the unique index
            // already rejected the insert, so just report it.
            Ok(Reservation {
                success: false,
                reason: Some("Time slot not available".to_string()),
            })
        }
    }
}
