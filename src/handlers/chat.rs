use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    /// Omitted on the first message; the generated id must be echoed back
    /// on follow-ups so selections land on the right offer.
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = req
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    tracing::info!(session = %session_id, message = %req.message, "incoming chat message");

    let reply = conversation::process_message(&state, &session_id, &req.message)
        .await
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    Ok(Json(ChatResponse { session_id, reply }))
}
