//! Fan-out of one message to every configured sink.

use crate::sink::Sink;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Sinks that accepted the message.
    pub delivered: Vec<String>,
    /// Sinks that failed, with the error text.
    pub failed: Vec<(String, String)>,
}

impl DispatchReport {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sends messages to a list of sinks, one after another.
#[derive(Clone, Default)]
pub struct Dispatcher {
    sinks: Vec<Arc<dyn Sink>>,
}

impl Dispatcher {
    pub fn new(sinks: Vec<Arc<dyn Sink>>) -> Self {
        Self { sinks }
    }

    /// Add a sink.
    pub fn register(&mut self, sink: Arc<dyn Sink>) {
        self.sinks.push(sink);
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `message` to every sink. A failing sink is logged and does
    /// not stop delivery to the rest.
    pub async fn dispatch(&self, message: &str) -> DispatchReport {
        let mut report = DispatchReport::default();
        if self.sinks.is_empty() {
            warn!("No notification sinks configured, message dropped");
            return report;
        }

        for sink in &self.sinks {
            match sink.deliver(message).await {
                Ok(()) => report.delivered.push(sink.name().to_string()),
                Err(e) => {
                    error!(sink = sink.name(), error = %e, "Failed to send message");
                    report.failed.push((sink.name().to_string(), e.to_string()));
                }
            }
        }

        info!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "Dispatch finished"
        );
        report
    }
}
