use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{OracleError, Reservation, SlotOracle};
use crate::models::{DateSpec, TimeSpec};

/// Calendar served by a separate availability service over HTTP.
///
/// Wire contract: `POST /check-availability {date, time}` returns
/// `{available, alternative_time?}`, `POST /book-appointment {date, time}`
/// returns `{success, message}`. This process serves the same contract, so
/// one instance can use another as its calendar.
pub struct HttpOracle {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct AvailabilityResponse {
    available: bool,
}

#[derive(Deserialize)]
struct BookingResponse {
    success: bool,
    message: Option<String>,
}

impl HttpOracle {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build availability service client")?;

        Ok(Self { base_url, client })
    }

    async fn post(
        &self,
        path: &str,
        date: &DateSpec,
        time: &TimeSpec,
    ) -> Result<reqwest::Response, OracleError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(&json!({
                "date": date.to_string(),
                "time": time.to_string(),
            }))
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(OracleError::Transport(format!(
                "availability service returned status {status}"
            )));
        }

        Ok(resp)
    }
}

#[async_trait]
impl SlotOracle for HttpOracle {
    async fn is_free(&self, date: &DateSpec, time: &TimeSpec) -> Result<bool, OracleError> {
        let resp = self.post("/check-availability", date, time).await?;

        let data: AvailabilityResponse = resp
            .json()
            .await
            .map_err(|e| OracleError::Malformed(e.to_string()))?;

        Ok(data.available)
    }

    async fn reserve(
        &self,
        date: &DateSpec,
        time: &TimeSpec,
    ) -> Result<Reservation, OracleError> {
        let resp = self.post("/book-appointment", date, time).await?;

        let data: BookingResponse = resp
            .json()
            .await
            .map_err(|e| OracleError::Malformed(e.to_string()))?;

        Ok(Reservation {
            success: data.success,
            reason: data.message,
        })
    }
}
