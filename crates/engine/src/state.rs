//! Last seen prices.

use goldwatch_core::{PriceRecord, SourceId};
use std::collections::HashMap;

/// Last seen record per source.
///
/// Every known source has a slot from the start; a slot is `None` until the
/// source is read successfully for the first time. Memory only.
#[derive(Debug, Clone)]
pub struct PriceState {
    slots: HashMap<SourceId, Option<PriceRecord>>,
}

impl PriceState {
    /// State with an empty slot for every known source.
    pub fn new() -> Self {
        Self {
            slots: SourceId::ALL.iter().map(|&s| (s, None)).collect(),
        }
    }

    pub fn get(&self, source: SourceId) -> Option<&PriceRecord> {
        self.slots.get(&source).and_then(Option::as_ref)
    }

    /// Replace the slot for `record.source`, returning the previous value.
    pub fn store(&mut self, record: PriceRecord) -> Option<PriceRecord> {
        self.slots.insert(record.source, Some(record)).flatten()
    }

    /// Number of sources that have been seen at least once.
    pub fn seen(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.seen() == 0
    }
}

impl Default for PriceState {
    fn default() -> Self {
        Self::new()
    }
}
