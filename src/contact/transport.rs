//! Submission transport abstraction and the simulated transport

use super::input::FormInput;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Delay of the simulated transport
pub const SIMULATED_DELAY: Duration = Duration::from_millis(1500);

/// Acknowledgement of a delivered submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    /// Message id assigned by the email provider, if any
    pub id: Option<String>,
    pub accepted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            accepted_at: Utc::now(),
        }
    }
}

/// Delivery failures. The visitor only ever sees the generic failure text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request error: {0}")]
    Request(String),
    #[error("email service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Delivers contact form submissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, input: &FormInput) -> Result<SubmissionReceipt, TransportError>;
}

/// Waits a fixed delay, logs the payload and always succeeds
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(SIMULATED_DELAY)
    }
}

#[async_trait]
impl SubmissionTransport for SimulatedTransport {
    async fn submit(&self, input: &FormInput) -> Result<SubmissionReceipt, TransportError> {
        tokio::time::sleep(self.delay).await;
        match serde_json::to_string(input) {
            Ok(payload) => tracing::info!("Form data: {payload}"),
            Err(e) => tracing::warn!("Could not serialize form data: {e}"),
        }
        Ok(SubmissionReceipt::new(None))
    }
}
