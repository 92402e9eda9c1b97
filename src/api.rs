use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::types::RawDrawRecord;

/// Remote provider of historical draw records.
#[async_trait]
pub trait DrawDataSource: Send + Sync {
    /// Returns every draw the provider knows about. An empty or malformed
    /// response is an error.
    async fn fetch_draws(&self) -> Result<Vec<RawDrawRecord>>;
}

/// Winning numbers published on the NY Open Data portal.
pub struct NyOpenDataSource {
    client: reqwest::Client,
    url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl NyOpenDataSource {
    pub fn new(
        url: &str,
        timeout: Duration,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building http client")?;

        Ok(Self {
            client,
            url: url.to_string(),
            max_retries,
            retry_delay,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.draws_url,
            config.fetch_timeout,
            config.fetch_retries,
            config.retry_delay,
        )
    }

    async fn fetch_once(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl DrawDataSource for NyOpenDataSource {
    async fn fetch_draws(&self) -> Result<Vec<RawDrawRecord>> {
        let mut attempt = 0;
        let body = loop {
            match self.fetch_once().await {
                Ok(body) => break body,
                Err(e) if attempt < self.max_retries => {
                    let delay = self.retry_delay.saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    warn!(
                        "draw fetch attempt {} of {} failed: {}; retrying in {:?}",
                        attempt,
                        self.max_retries + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(e.context(format!(
                        "GET {} failed after {} attempts",
                        self.url,
                        attempt + 1
                    )));
                }
            }
        };

        let records = records_from_body(body)?;
        debug!("fetched {} draw records from {}", records.len(), self.url);
        Ok(records)
    }
}

/// Accepts only a non-empty JSON array. Entries missing the expected fields are dropped.
pub fn records_from_body(body: Value) -> Result<Vec<RawDrawRecord>> {
    let entries = match body {
        Value::Array(entries) if !entries.is_empty() => entries,
        Value::Array(_) => anyhow::bail!("draw response is an empty array"),
        _ => anyhow::bail!("draw response is not an array"),
    };

    let records = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawDrawRecord>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("skipping draw record: {}", e);
                None
            }
        })
        .collect();

    Ok(records)
}
