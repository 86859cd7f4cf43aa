pub mod remote;
pub mod sqlite;

use async_trait::async_trait;

use crate::models::{DateSpec, TimeSpec};

/// Failure at the availability capability boundary. Distinct from a
/// business-level "slot is busy" result, which is ordinary data.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("availability service unreachable: {0}")]
    Transport(String),

    #[error("malformed availability response: {0}")]
    Malformed(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Result of a reservation attempt. `success: false` with a reason means
/// the slot was taken between check and reserve, not that the call failed.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub success: bool,
    pub reason: Option<String>,
}

/// The single-resource calendar the core books against. Implementations
/// must re-verify availability inside `reserve`; a prior `is_free` result
/// may be stale by the time `reserve` runs.
#[async_trait]
pub trait SlotOracle: Send + Sync {
    async fn is_free(&self, date: &DateSpec, time: &TimeSpec) -> Result<bool, OracleError>;

    async fn reserve(
        &self,
        date: &DateSpec,
        time: &TimeSpec,
    ) -> Result<Reservation, OracleError>;
}
