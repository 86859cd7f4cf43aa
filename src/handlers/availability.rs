use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{DateSpec, TimeSpec};
use crate::services::alternatives::find_alternatives;
use crate::state::AppState;

// The calendar wire contract. `HttpOracle` consumes exactly these shapes,
// so one instance can serve as another's calendar.

#[derive(Deserialize)]
pub struct SlotRequest {
    pub date: DateSpec,
    pub time: TimeSpec,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_time: Option<Vec<TimeSpec>>,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SlotRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let oracle = state.oracle.as_ref();

    if oracle.is_free(&req.date, &req.time).await? {
        return Ok(Json(AvailabilityResponse {
            available: true,
            alternative_time: None,
        }));
    }

    let alternatives =
        find_alternatives(oracle, &req.date, &req.time, state.config.max_alternatives).await?;

    Ok(Json(AvailabilityResponse {
        available: false,
        alternative_time: Some(alternatives),
    }))
}

pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SlotRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let reservation = state.oracle.reserve(&req.date, &req.time).await?;

    let message = if reservation.success {
        "Appointment booked successfully".to_string()
    } else {
        reservation
            .reason
            .unwrap_or_else(|| "Time slot not available".to_string())
    };

    Ok(Json(BookingResponse {
        success: reservation.success,
        message,
    }))
}
