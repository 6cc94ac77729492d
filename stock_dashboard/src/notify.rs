//! Best-effort delivery of scan results.
//!
//! Callers log a failed send and carry on; nothing here is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{
    config::NotifyConfig,
    report::{ScanRow, render_scan_table},
};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook answered {status}")]
    Rejected { status: reqwest::StatusCode },
}

#[async_trait]
pub trait Notifier {
    async fn send(&self, rows: &[ScanRow]) -> Result<(), NotifyError>;

    fn name(&self) -> &'static str;
}

/// Prints the table to stdout.
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, rows: &[ScanRow]) -> Result<(), NotifyError> {
        print!("{}", render_scan_table(rows));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    rows: &'a [ScanRow],
}

/// POSTs the rows as JSON.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, rows: &[ScanRow]) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            generated_at: chrono::Utc::now(),
            rows,
        };
        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected { status });
        }
        info!(rows = rows.len(), %status, "scan results delivered");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

pub fn build_notifier(cfg: &NotifyConfig) -> Result<Box<dyn Notifier + Send + Sync>, NotifyError> {
    match &cfg.webhook_url {
        Some(url) => Ok(Box::new(WebhookNotifier::new(
            url,
            Duration::from_secs(cfg.timeout_secs),
        )?)),
        None => Ok(Box::new(StdoutNotifier)),
    }
}
