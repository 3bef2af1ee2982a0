//! Price change notifications.
//!
//! This crate provides:
//! - Message composition for changed prices
//! - Webhook (Slack, Discord) and Telegram sinks
//! - A dispatcher that fans one message out to every sink

pub mod dispatcher;
pub mod message;
pub mod sink;
pub mod telegram;
pub mod webhook;

pub use dispatcher::{DispatchReport, Dispatcher};
pub use message::{compose, compose_at, format_block, MessageOptions};
pub use sink::{DispatchError, Sink};
pub use telegram::TelegramSink;
pub use webhook::{WebhookFormat, WebhookSink};
