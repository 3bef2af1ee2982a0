//! Telegram channel sink.

use crate::sink::{DispatchError, Sink};
use async_trait::async_trait;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use tracing::info;

/// Parse a channel id: numeric chat id or `@channelusername`.
pub fn parse_recipient(channel_id: &str) -> Result<Recipient, DispatchError> {
    let channel_id = channel_id.trim();
    if let Ok(id) = channel_id.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }
    if channel_id.len() > 1 && channel_id.starts_with('@') {
        return Ok(Recipient::ChannelUsername(channel_id.to_string()));
    }
    Err(DispatchError::Config(format!(
        "Telegram channel must be a chat id or @username, got {channel_id:?}"
    )))
}

/// Sends messages to a Telegram chat or channel through the bot API.
pub struct TelegramSink {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramSink {
    /// Create a sink for `channel_id` with the given bot token.
    pub fn new(token: &str, channel_id: &str, timeout: Option<Duration>) -> Result<Self, DispatchError> {
        let recipient = parse_recipient(channel_id)?;
        let bot = match timeout {
            Some(timeout) => {
                let client = teloxide::net::default_reqwest_settings()
                    .timeout(timeout)
                    .build()
                    .map_err(|e| DispatchError::Config(e.to_string()))?;
                Bot::with_client(token, client)
            }
            None => Bot::new(token),
        };
        Ok(Self { bot, recipient })
    }
}

#[async_trait]
impl Sink for TelegramSink {
    fn name(&self) -> &str {
        "Telegram"
    }

    // Messages use `*bold*`, which is legacy Markdown. MarkdownV2 would
    // require escaping every `.` and `-` in the prices.
    #[allow(deprecated)]
    async fn deliver(&self, message: &str) -> Result<(), DispatchError> {
        self.bot
            .send_message(self.recipient.clone(), message)
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(|e| DispatchError::Telegram(e.to_string()))?;
        info!(sink = self.name(), "Message sent");
        Ok(())
    }
}
