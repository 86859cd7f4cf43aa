use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::extract::EntityExtractor;
use crate::services::negotiation::NegotiationState;
use crate::services::oracle::SlotOracle;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub extractor: Box<dyn EntityExtractor>,
    pub oracle: Box<dyn SlotOracle>,
    /// Live negotiation context per chat session. Access is sequential per
    /// session; the lock is never held across an await.
    pub sessions: Mutex<HashMap<String, NegotiationState>>,
}
