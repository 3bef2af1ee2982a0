//! Fixed-interval polling loop.
//!
//! The loop alternates between running a cycle and waiting on a [`Ticker`].
//! A panicking cycle is logged and skipped; the next one runs on schedule.

use crate::pipeline::{CycleReport, GoldWatcher};
use async_trait::async_trait;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::{error, info};

/// Source of the pause between cycles.
#[async_trait]
pub trait Ticker: Send {
    /// Wait until the next cycle is due. Returning `false` ends the loop.
    async fn tick(&mut self) -> bool;
}

/// Sleeps a fixed interval after every cycle, however long the cycle took.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        tokio::time::sleep(self.interval).await;
        true
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Drives a [`GoldWatcher`] forever.
pub struct Scheduler {
    watcher: GoldWatcher,
    cycles: u64,
    failed_cycles: u64,
}

impl Scheduler {
    pub fn new(watcher: GoldWatcher) -> Self {
        Self {
            watcher,
            cycles: 0,
            failed_cycles: 0,
        }
    }

    pub fn watcher(&self) -> &GoldWatcher {
        &self.watcher
    }

    /// Cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Cycles that panicked.
    pub fn failed_cycles(&self) -> u64 {
        self.failed_cycles
    }

    /// Run one cycle, containing any panic. Returns `None` if the cycle panicked.
    pub async fn run_once(&mut self) -> Option<CycleReport> {
        self.cycles += 1;
        let cycle = self.cycles;
        match AssertUnwindSafe(self.watcher.run_cycle()).catch_unwind().await {
            Ok(report) => {
                info!(
                    cycle = cycle,
                    collected = report.collected,
                    changed = report.changed.len(),
                    "Checked prices"
                );
                Some(report)
            }
            Err(panic) => {
                self.failed_cycles += 1;
                error!(cycle = cycle, error = %panic_message(panic.as_ref()), "Cycle failed");
                None
            }
        }
    }

    /// Alternate cycles and ticks until the ticker says stop.
    pub async fn run<T: Ticker + ?Sized>(&mut self, ticker: &mut T) {
        loop {
            self.run_once().await;
            if !ticker.tick().await {
                break;
            }
        }
        info!(cycles = self.cycles, failed = self.failed_cycles, "Scheduler stopped");
    }
}
