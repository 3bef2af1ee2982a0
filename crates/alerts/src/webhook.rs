//! JSON webhook sinks (Slack, Discord).

use crate::sink::{DispatchError, Sink};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

/// Payload convention of a webhook endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookFormat {
    /// `{"text": "..."}`
    Slack,
    /// `{"content": "..."}`
    Discord,
}

impl WebhookFormat {
    /// JSON field carrying the message.
    pub fn field(self) -> &'static str {
        match self {
            WebhookFormat::Slack => "text",
            WebhookFormat::Discord => "content",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WebhookFormat::Slack => "Slack",
            WebhookFormat::Discord => "Discord",
        }
    }
}

/// Posts messages to an incoming-webhook URL.
pub struct WebhookSink {
    format: WebhookFormat,
    url: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for WebhookSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL embeds the webhook secret.
        f.debug_struct("WebhookSink")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl WebhookSink {
    pub fn new(format: WebhookFormat, url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DispatchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| DispatchError::Config(e.to_string()))?;
        Ok(Self {
            format,
            url: url.into(),
            http_client,
        })
    }

    /// JSON body posted for `message`.
    pub fn payload(&self, message: &str) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(self.format.field().to_string(), json!(message));
        Value::Object(body)
    }
}

#[async_trait]
impl Sink for WebhookSink {
    fn name(&self) -> &str {
        self.format.name()
    }

    async fn deliver(&self, message: &str) -> Result<(), DispatchError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| DispatchError::Request {
                sink: self.name().to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status {
                sink: self.name().to_string(),
                status: status.as_u16(),
            });
        }

        info!(sink = self.name(), status = status.as_u16(), "Message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one HTTP request, answer with `status`, return the raw request.
    async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let (k, v) = l.split_once(':')?;
                            k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!("HTTP/1.1 {status_line}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok");
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&buf).to_string()
        });
        (url, handle)
    }

    #[test]
    fn test_payload_field_per_format() {
        let slack = WebhookSink::new(WebhookFormat::Slack, "https://hooks.example/a", None).unwrap();
        assert_eq!(slack.payload("hi"), json!({"text": "hi"}));

        let discord = WebhookSink::new(WebhookFormat::Discord, "https://hooks.example/b", None).unwrap();
        assert_eq!(discord.payload("hi"), json!({"content": "hi"}));
    }

    #[test]
    fn test_debug_hides_url() {
        let sink = WebhookSink::new(WebhookFormat::Slack, "https://hooks.example/secret", None).unwrap();
        assert!(!format!("{:?}", sink).contains("secret"));
    }

    #[tokio::test]
    async fn test_deliver_posts_json() {
        let (url, server) = serve_once("200 OK").await;
        let sink = WebhookSink::new(WebhookFormat::Discord, url, Some(Duration::from_secs(5))).unwrap();

        sink.deliver("Giá vàng").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /hook"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"content":"Giá vàng"}"#));
    }

    #[tokio::test]
    async fn test_deliver_rejects_non_success() {
        let (url, server) = serve_once("500 Internal Server Error").await;
        let sink = WebhookSink::new(WebhookFormat::Slack, url, Some(Duration::from_secs(5))).unwrap();

        let err = sink.deliver("x").await.unwrap_err();
        assert!(matches!(err, DispatchError::Status { status: 500, .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_deliver_connection_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sink = WebhookSink::new(WebhookFormat::Slack, format!("http://{addr}/hook"), Some(Duration::from_secs(5))).unwrap();
        let err = sink.deliver("x").await.unwrap_err();
        assert!(matches!(err, DispatchError::Request { .. }));
    }
}
