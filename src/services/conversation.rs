use std::sync::Arc;

use chrono::Local;

use crate::models::{Intent, ParsedRequest};
use crate::services::booking;
use crate::services::negotiation::{self, NegotiationState, Resolution};
use crate::services::normalize::{normalize_date, normalize_time};
use crate::state::AppState;

const CLARIFY_PROMPT: &str = "I couldn't understand the date and time. Please try formats like:
  • 'tomorrow at 3 pm'
  • 'friday at 2:30 pm'
  • 'next monday at 10 am'
  • 'august 15 at 9:00 am'";

/// Runs one chat turn for a session: exit check, entity extraction,
/// normalization, negotiation, booking, and reply rendering.
pub async fn process_message(
    state: &Arc<AppState>,
    session_id: &str,
    message: &str,
) -> anyhow::Result<String> {
    if negotiation::is_exit_phrase(message) {
        state.sessions.lock().unwrap().remove(session_id);
        return Ok("Goodbye!".to_string());
    }

    let phrases = state.extractor.extract(message).await?;

    let today = Local::now().date_naive();
    let parsed = ParsedRequest {
        intent: Intent::Book,
        date: phrases
            .date_phrase
            .as_deref()
            .and_then(|p| normalize_date(p, today)),
        time: phrases.time_phrase.as_deref().and_then(normalize_time),
    };

    let session_state = state
        .sessions
        .lock()
        .unwrap()
        .get(session_id)
        .cloned()
        .unwrap_or_default();

    tracing::info!(
        session = session_id,
        date = ?parsed.date,
        time = ?parsed.time,
        awaiting_selection = matches!(session_state, NegotiationState::AwaitingSelection { .. }),
        "processing message"
    );

    let (date, time) = match negotiation::resolve(&session_state, &parsed, message) {
        Resolution::Book { date, time } => (date, time),
        // A live offer survives an unintelligible reply; with no offer
        // there is nothing to keep.
        Resolution::Clarify => return Ok(CLARIFY_PROMPT.to_string()),
    };

    let outcome = booking::attempt_booking(
        state.oracle.as_ref(),
        date,
        time,
        state.config.max_alternatives,
    )
    .await;

    let message_text = outcome.message();
    let next = negotiation::next_state(&outcome);

    let reply = match &next {
        NegotiationState::AwaitingSelection { offer } => {
            negotiation::render_offer_reply(&message_text, offer)
        }
        NegotiationState::Idle => message_text,
    };

    let mut sessions = state.sessions.lock().unwrap();
    match next {
        NegotiationState::Idle => {
            sessions.remove(session_id);
        }
        awaiting @ NegotiationState::AwaitingSelection { .. } => {
            sessions.insert(session_id.to_string(), awaiting);
        }
    }

    Ok(reply)
}
