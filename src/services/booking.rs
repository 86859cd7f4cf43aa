use crate::models::{DateSpec, Intent, Outcome, TimeSpec};
use crate::services::alternatives::find_alternatives;
use crate::services::oracle::{OracleError, SlotOracle};

/// Runs one check → reserve-or-offer sequence against the calendar.
///
/// Every failure mode is converted to an `Outcome` here; nothing
/// propagates past this function. The check and the reserve are separate
/// calls, so the oracle must re-verify inside `reserve`: a lost race
/// surfaces as `ReserveFailed`, never as a silent success.
pub async fn attempt_booking(
    oracle: &dyn SlotOracle,
    date: DateSpec,
    time: TimeSpec,
    max_alternatives: usize,
) -> Outcome {
    let free = match oracle.is_free(&date, &time).await {
        Ok(free) => free,
        Err(e) => return outcome_from_oracle_error(e),
    };

    if free {
        return match oracle.reserve(&date, &time).await {
            Ok(reservation) if reservation.success => {
                tracing::info!(date = %date, time = %time, "appointment booked");
                Outcome::Booked { date, time }
            }
            Ok(reservation) => {
                tracing::warn!(date = %date, time = %time, "reservation lost after free check");
                Outcome::ReserveFailed {
                    date,
                    time,
                    reason: reservation.reason,
                }
            }
            Err(e) => outcome_from_oracle_error(e),
        };
    }

    match find_alternatives(oracle, &date, &time, max_alternatives).await {
        Ok(alternatives) if !alternatives.is_empty() => Outcome::BusyWithAlternatives {
            date,
            time,
            alternatives,
        },
        Ok(_) => Outcome::BusyNoAlternatives { date, time },
        Err(e) => outcome_from_oracle_error(e),
    }
}

/// Entry point for structured requests: rejects non-booking intents before
/// touching the calendar.
pub async fn handle_request(
    oracle: &dyn SlotOracle,
    intent: Intent,
    date: DateSpec,
    time: TimeSpec,
    max_alternatives: usize,
) -> Outcome {
    if intent != Intent::Book {
        return Outcome::UnsupportedIntent;
    }

    attempt_booking(oracle, date, time, max_alternatives).await
}

fn outcome_from_oracle_error(err: OracleError) -> Outcome {
    tracing::error!(error = %err, "availability capability failed");
    match err {
        OracleError::Malformed(reason) => Outcome::MalformedResponse { reason },
        OracleError::Transport(reason) | OracleError::Database(reason) => {
            Outcome::TransportError { reason }
        }
    }
}
