use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{DateSpec, Intent, TimeSpec};
use crate::services::booking;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CheckAppointmentRequest {
    pub intent: Intent,
    pub date: DateSpec,
    pub time: TimeSpec,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub status: &'static str,
    pub message: String,
}

/// Structured scheduling entry point: canonical date and time, no NLP.
pub async fn check_appointment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckAppointmentRequest>,
) -> Json<ScheduleResponse> {
    let outcome = booking::handle_request(
        state.oracle.as_ref(),
        req.intent,
        req.date,
        req.time,
        state.config.max_alternatives,
    )
    .await;

    Json(ScheduleResponse {
        status: if outcome.is_success() {
            "success"
        } else {
            "error"
        },
        message: outcome.message(),
    })
}
