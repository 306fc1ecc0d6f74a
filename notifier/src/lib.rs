//! Alert delivery.
//!
//! The engine talks to [`AlertSink`] only; delivery failures are reported
//! as [`NotifyError`] and logged by the caller — a broken chat must never
//! take the monitoring loop down.

pub mod format;
pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram rejected message: {0}")]
    Rejected(String),
}

/// Delivery seam for formatted alert messages.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
