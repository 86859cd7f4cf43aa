use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use slotbook::config::AppConfig;
use slotbook::db;
use slotbook::handlers;
use slotbook::services::extract::rules::RuleBasedExtractor;
use slotbook::services::oracle::remote::HttpOracle;
use slotbook::services::oracle::sqlite::SqliteOracle;
use slotbook::services::oracle::SlotOracle;
use slotbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let db = Arc::new(Mutex::new(conn));

    let oracle: Box<dyn SlotOracle> = match &config.oracle_url {
        Some(url) => {
            tracing::info!("using remote availability service (url: {url})");
            Box::new(HttpOracle::new(
                url.clone(),
                Duration::from_secs(config.oracle_timeout_secs),
            )?)
        }
        None => {
            tracing::info!("using local calendar (db: {})", config.database_url);
            Box::new(SqliteOracle::new(Arc::clone(&db)))
        }
    };

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        extractor: Box::new(RuleBasedExtractor),
        oracle,
        sessions: Mutex::new(HashMap::new()),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/chat", post(handlers::chat::chat))
        .route(
            "/api/check-appointment",
            post(handlers::schedule::check_appointment),
        )
        .route(
            "/check-availability",
            post(handlers::availability::check_availability),
        )
        .route(
            "/book-appointment",
            post(handlers::availability::book_appointment),
        )
        .route(
            "/api/appointments",
            get(handlers::appointments::list_appointments),
        )
        .route(
            "/api/appointments/summary",
            get(handlers::appointments::summary),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
