use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use super::{EntityExtractor, ExtractedPhrases};

fn date_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(?:(?:next|this)\s+)?(?:today|tomorrow|monday|tuesday|wednesday|thursday|friday|saturday|sunday|january|february|march|april|may|june|july|august|september|october|november|december)(?:\s+\d{1,2})?\b",
        )
        .expect("failed to compile date phrase regex")
    })
}

// A bare `H:MM` with no am/pm marker and no "at" is deliberately not a
// time phrase: follow-up selections like "14:00" must reach the
// negotiation engine unparsed.
fn time_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b\d{1,2}:\d{2}\s*(?:am|pm)\b|\b\d{1,2}\s*(?:am|pm)\b|\bat\s+\d{1,2}:\d{2}\s*(?:am|pm)?\b",
        )
        .expect("failed to compile time phrase regex")
    })
}

/// Keyword and pattern based extractor. Good enough for the supported
/// phrasings without pulling in a model runtime.
pub struct RuleBasedExtractor;

#[async_trait]
impl EntityExtractor for RuleBasedExtractor {
    async fn extract(&self, utterance: &str) -> anyhow::Result<ExtractedPhrases> {
        let lowered = utterance.to_lowercase();

        let date_phrase = date_phrase_re()
            .find(&lowered)
            .map(|m| m.as_str().to_string());
        let time_phrase = time_phrase_re()
            .find(&lowered)
            .map(|m| m.as_str().to_string());

        Ok(ExtractedPhrases {
            date_phrase,
            time_phrase,
        })
    }
}
