//! Notification sink abstraction.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Request to {sink} failed: {message}")]
    Request { sink: String, message: String },
    #[error("{sink} returned HTTP {status}")]
    Status { sink: String, status: u16 },
    #[error("Telegram API error: {0}")]
    Telegram(String),
    #[error("Invalid sink configuration: {0}")]
    Config(String),
}

/// An outbound notification destination.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn deliver(&self, message: &str) -> Result<(), DispatchError>;
}
