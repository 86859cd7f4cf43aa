pub mod rules;

use async_trait::async_trait;

/// Raw text spans labeled as date and time, before normalization. Either
/// may be absent when the utterance names nothing recognizable.
#[derive(Debug, Clone, Default)]
pub struct ExtractedPhrases {
    pub date_phrase: Option<String>,
    pub time_phrase: Option<String>,
}

/// Pulls date and time phrases out of a free-form utterance.
///
/// This is a swappable capability: the core only consumes the phrase
/// strings, so any classifier (rule-based, model-backed, remote) can sit
/// behind it and tests can supply phrases by hand.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract(&self, utterance: &str) -> anyhow::Result<ExtractedPhrases>;
}
