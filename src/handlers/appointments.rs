use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Appointment;
use crate::state::AppState;

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = {
        let db = state.db.lock().unwrap();
        queries::list_appointments(&db).map_err(|e| AppError::Database(e.to_string()))?
    };

    Ok(Json(appointments))
}

#[derive(Serialize)]
pub struct DateSummary {
    pub date: String,
    pub count: i64,
}

pub async fn summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DateSummary>>, AppError> {
    let per_date = {
        let db = state.db.lock().unwrap();
        queries::appointments_per_date(&db).map_err(|e| AppError::Database(e.to_string()))?
    };

    let summary = per_date
        .into_iter()
        .map(|(date, count)| DateSummary { date, count })
        .collect();

    Ok(Json(summary))
}
