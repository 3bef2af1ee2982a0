//! Price change detector.

use crate::state::PriceState;
use goldwatch_core::PriceRecord;
use tracing::debug;

/// How two records for the same source are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonMode {
    /// Label and formatted price strings must match.
    #[default]
    Display,
    /// Prices compared by numeric value where both sides parsed.
    Numeric,
}

/// Configuration for the change detector.
#[derive(Debug, Clone, Default)]
pub struct DetectorConfig {
    pub comparison: ComparisonMode,
}

/// Classifies the records of a poll as changed or unchanged.
///
/// The detector holds no state itself; the caller owns the [`PriceState`]
/// and passes it in on every call.
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    config: DetectorConfig,
}

impl ChangeDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    fn same(&self, a: &PriceRecord, b: &PriceRecord) -> bool {
        match self.config.comparison {
            ComparisonMode::Display => a.same_display(b),
            ComparisonMode::Numeric => a.same_value(b),
        }
    }

    /// Return the records that differ from the last seen price of their
    /// source and store them as the new last seen price.
    ///
    /// A source seen for the first time always counts as changed. Sources
    /// missing from `current` keep their stored price.
    pub fn diff(&self, state: &mut PriceState, current: &[PriceRecord]) -> Vec<PriceRecord> {
        let mut changed = Vec::new();
        for record in current {
            let unchanged = state
                .get(record.source)
                .is_some_and(|previous| self.same(previous, record));
            if unchanged {
                debug!(source = record.source.code(), "Price unchanged");
                continue;
            }
            debug!(
                source = record.source.code(),
                buy = %record.buy_price,
                sell = %record.sell_price,
                "Price changed"
            );
            state.store(record.clone());
            changed.push(record.clone());
        }
        changed
    }
}
