//! Vendor page adapters.
//!
//! Each vendor lays out its price table differently.
//! Adapters turn a page into the headline `PriceRecord` for that vendor.

mod btmc;
mod btmh;

pub use btmc::BtmcAdapter;
pub use btmh::BtmhAdapter;

use crate::FeedError;
use goldwatch_core::{PriceRecord, SourceId};
use tracing::{debug, warn};

/// Trait for vendor-specific page parsers.
///
/// Only the first qualifying product row of a page is read.
pub trait SourceAdapter {
    /// Get the source identifier
    fn source() -> SourceId;

    /// Parse a vendor page into its headline price record.
    fn parse_page(html: &str) -> Result<PriceRecord, FeedError>;

    /// Parse a page, logging and discarding any failure.
    fn extract(html: &str) -> Option<PriceRecord> {
        match Self::parse_page(html) {
            Ok(record) => {
                debug!(
                    source = Self::source().code(),
                    product = %record.product_type,
                    buy = %record.buy_price,
                    sell = %record.sell_price,
                    "Extracted price row"
                );
                Some(record)
            }
            Err(e) => {
                warn!(source = Self::source().code(), error = %e, "Failed to parse price page");
                None
            }
        }
    }
}

/// Run the adapter belonging to `source`.
pub fn extract(source: SourceId, html: &str) -> Option<PriceRecord> {
    match source {
        SourceId::BaoTinManhHai => BtmhAdapter::extract(html),
        SourceId::BaoTinMinhChau => BtmcAdapter::extract(html),
    }
}
