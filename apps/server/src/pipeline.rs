//! One fetch, detect, notify cycle.

use goldwatch_alerts::{compose, DispatchReport, Dispatcher, MessageOptions};
use goldwatch_core::SourceId;
use goldwatch_engine::{ChangeDetector, PriceState};
use goldwatch_feeds::PriceAggregator;
use tracing::{info, warn};

/// Summary of one cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Records extracted across all sources.
    pub collected: usize,
    /// Sources whose price changed, in notification order.
    pub changed: Vec<SourceId>,
    /// Present when a notification was sent.
    pub dispatch: Option<DispatchReport>,
}

/// Owns the pipeline components and the last seen prices.
pub struct GoldWatcher {
    aggregator: PriceAggregator,
    detector: ChangeDetector,
    state: PriceState,
    dispatcher: Dispatcher,
    message_options: MessageOptions,
}

impl GoldWatcher {
    pub fn new(
        aggregator: PriceAggregator,
        detector: ChangeDetector,
        dispatcher: Dispatcher,
        message_options: MessageOptions,
    ) -> Self {
        Self {
            aggregator,
            detector,
            state: PriceState::new(),
            dispatcher,
            message_options,
        }
    }

    pub fn state(&self) -> &PriceState {
        &self.state
    }

    /// Collect prices, update the last seen state and notify on changes.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let records = self.aggregator.collect().await;
        let changed = self.detector.diff(&mut self.state, &records);

        let mut report = CycleReport {
            collected: records.len(),
            changed: changed.iter().map(|r| r.source).collect(),
            dispatch: None,
        };

        match compose(&changed, &self.message_options) {
            Some(message) => {
                info!(changed = changed.len(), "Price change detected, notifying");
                let dispatch = self.dispatcher.dispatch(&message).await;
                if !dispatch.all_delivered() {
                    warn!(failed = dispatch.failed.len(), "Notification missed some sinks");
                }
                report.dispatch = Some(dispatch);
            }
            None => info!(collected = records.len(), "No price changes"),
        }

        report
    }
}
