use std::sync::OnceLock;

use regex::Regex;

use crate::models::{DateSpec, Outcome, ParsedRequest, SlotOffer, TimeSpec};
use crate::services::normalize::normalize_time;

/// Labels assigned to offered alternatives, in offer order.
pub const OFFER_LABELS: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];

const EXIT_PHRASES: [&str; 3] = ["exit", "quit", "bye"];

const OFFER_LEAD_IN: &str = "Would you like to book one of these alternative times:";

fn alternative_times_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"alternative times: ([^?]+)")
            .expect("failed to compile alternative times regex")
    })
}

/// Per-session negotiation state. `AwaitingSelection` holds the one live
/// offer; everything else is `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NegotiationState {
    #[default]
    Idle,
    AwaitingSelection { offer: SlotOffer },
}

/// What an utterance resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A complete booking request, ready for the orchestrator.
    Book { date: DateSpec, time: TimeSpec },
    /// Not enough information and no selection matched; ask the user to
    /// rephrase. The caller leaves the session state untouched, so a live
    /// offer survives an unintelligible reply.
    Clarify,
}

pub fn is_exit_phrase(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    EXIT_PHRASES.contains(&input.as_str())
}

/// Resolves one utterance against the current state.
///
/// A full date+time parse always books. When the normalizer extracted
/// neither and an offer is live, the input is tried as a selection: first
/// as a single-letter label, then as a bare time that must be a member of
/// the offer. Everything else asks for clarification.
pub fn resolve(
    state: &NegotiationState,
    parsed: &ParsedRequest,
    raw_input: &str,
) -> Resolution {
    if let (Some(date), Some(time)) = (parsed.date, parsed.time) {
        return Resolution::Book { date, time };
    }

    if parsed.date.is_none() && parsed.time.is_none() {
        if let NegotiationState::AwaitingSelection { offer } = state {
            let cleaned = raw_input.trim().to_lowercase();

            let mut chars = cleaned.chars();
            if let (Some(label), None) = (chars.next(), chars.next()) {
                if let Some(time) = offer.time_for_label(label) {
                    return Resolution::Book {
                        date: offer.date,
                        time,
                    };
                }
            }

            if let Some(time) = normalize_time(raw_input) {
                if offer.contains_time(time) {
                    return Resolution::Book {
                        date: offer.date,
                        time,
                    };
                }
            }
        }
    }

    Resolution::Clarify
}

/// State after a booking attempt: a busy-with-alternatives outcome installs
/// a fresh offer (replacing any previous one), every other outcome clears
/// the context.
pub fn next_state(outcome: &Outcome) -> NegotiationState {
    match outcome {
        Outcome::BusyWithAlternatives { date, .. } => {
            match offer_from_message(&outcome.message(), *date) {
                Some(offer) => NegotiationState::AwaitingSelection { offer },
                None => NegotiationState::Idle,
            }
        }
        _ => NegotiationState::Idle,
    }
}

/// Rebuilds the offer from the rendered outcome message.
///
/// The times are deliberately re-extracted from the message text: the
/// `"alternative times: "` list up to the closing `?` is a contract with
/// the orchestrator's message format, not just display copy.
pub fn offer_from_message(message: &str, date: DateSpec) -> Option<SlotOffer> {
    let caps = alternative_times_re().captures(message)?;

    let times: Vec<TimeSpec> = caps[1]
        .split(", ")
        .filter_map(|piece| piece.trim().parse().ok())
        .collect();

    if times.is_empty() {
        return None;
    }

    let choices: Vec<(char, TimeSpec)> = OFFER_LABELS.iter().copied().zip(times).collect();

    Some(SlotOffer { date, choices })
}

/// Chat rendering of a live offer: the busy notice followed by lettered
/// choices the user can answer with.
pub fn render_offer_reply(message: &str, offer: &SlotOffer) -> String {
    let base = message.split(OFFER_LEAD_IN).next().unwrap_or(message).trim();

    let mut reply = format!("{base}\nAvailable alternatives:\n");
    for (label, time) in &offer.choices {
        reply.push_str(&format!("  {label}) {time}\n"));
    }
    reply.push_str("Type a letter to select an option.");
    reply
}
