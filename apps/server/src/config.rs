//! Application configuration.
//!
//! Read once at startup from environment variables (a `.env` file is loaded
//! into the environment first by `main`).

use goldwatch_alerts::{DispatchError, Dispatcher, MessageOptions, TelegramSink, WebhookFormat, WebhookSink};
use goldwatch_feeds::FetcherConfig;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Poll interval used when `INTERVAL` is unset.
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

pub const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";
pub const ENV_DISCORD_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
pub const ENV_TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_TELEGRAM_CHANNEL_ID: &str = "TELEGRAM_CHANNEL_ID";
pub const ENV_INTERVAL: &str = "INTERVAL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_INCLUDE_SOURCE_URL: &str = "INCLUDE_SOURCE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidSeconds { key: &'static str, value: String },
    #[error("{key} is not a valid URL: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
    #[error("Failed to set up sink: {0}")]
    Sink(#[from] DispatchError),
}

/// Telegram bot credentials.
#[derive(Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub channel_id: String,
}

/// Application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Timeout for page fetches and sink requests.
    pub http_timeout: Option<Duration>,
    /// Add the vendor URL to each notification block.
    pub include_source_url: bool,
    pub slack_webhook_url: Option<String>,
    pub discord_webhook_url: Option<String>,
    pub telegram: Option<TelegramSettings>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Webhook URLs and bot tokens are secrets; only report presence.
        f.debug_struct("AppConfig")
            .field("interval", &self.interval)
            .field("http_timeout", &self.http_timeout)
            .field("include_source_url", &self.include_source_url)
            .field("slack", &self.slack_webhook_url.is_some())
            .field("discord", &self.discord_webhook_url.is_some())
            .field("telegram", &self.telegram.is_some())
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            http_timeout: None,
            include_source_url: false,
            slack_webhook_url: None,
            discord_webhook_url: None,
            telegram: None,
        }
    }
}

fn parse_seconds(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_webhook_url(key: &'static str, value: String) -> Result<String, ConfigError> {
    let url = url::Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        key,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            key,
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url.to_string())
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();

        if let Some(value) = get(ENV_INTERVAL) {
            config.interval = parse_seconds(ENV_INTERVAL, &value)?;
        }
        if let Some(value) = get(ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout = Some(parse_seconds(ENV_HTTP_TIMEOUT_SECS, &value)?);
        }
        config.include_source_url = get(ENV_INCLUDE_SOURCE_URL).is_some_and(|v| parse_flag(&v));

        config.slack_webhook_url = get(ENV_SLACK_WEBHOOK_URL)
            .map(|v| parse_webhook_url(ENV_SLACK_WEBHOOK_URL, v))
            .transpose()?;
        config.discord_webhook_url = get(ENV_DISCORD_WEBHOOK_URL)
            .map(|v| parse_webhook_url(ENV_DISCORD_WEBHOOK_URL, v))
            .transpose()?;

        config.telegram = match (get(ENV_TELEGRAM_BOT_TOKEN), get(ENV_TELEGRAM_CHANNEL_ID)) {
            (Some(bot_token), Some(channel_id)) => Some(TelegramSettings {
                bot_token: bot_token.trim().to_string(),
                channel_id: channel_id.trim().to_string(),
            }),
            (None, None) => None,
            _ => {
                warn!(
                    "Telegram sink disabled: both {} and {} are required",
                    ENV_TELEGRAM_BOT_TOKEN, ENV_TELEGRAM_CHANNEL_ID
                );
                None
            }
        };

        Ok(config)
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: self.http_timeout,
            ..Default::default()
        }
    }

    pub fn message_options(&self) -> MessageOptions {
        MessageOptions {
            include_source_url: self.include_source_url,
        }
    }

    /// Build a dispatcher holding one sink per configured destination.
    pub fn build_dispatcher(&self) -> Result<Dispatcher, ConfigError> {
        let mut dispatcher = Dispatcher::default();
        if let Some(url) = &self.slack_webhook_url {
            dispatcher.register(Arc::new(WebhookSink::new(WebhookFormat::Slack, url.as_str(), self.http_timeout)?));
        }
        if let Some(url) = &self.discord_webhook_url {
            dispatcher.register(Arc::new(WebhookSink::new(WebhookFormat::Discord, url.as_str(), self.http_timeout)?));
        }
        if let Some(telegram) = &self.telegram {
            dispatcher.register(Arc::new(TelegramSink::new(
                &telegram.bot_token,
                &telegram.channel_id,
                self.http_timeout,
            )?));
        }
        Ok(dispatcher)
    }
}
