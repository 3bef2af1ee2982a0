//! Gold price collection from vendor web pages.
//!
//! ## Architecture
//!
//! - `rest` - Page fetching (`PageFetcher`, reqwest-backed `HttpFetcher`)
//! - `html` - Table scanning helpers
//! - `adapter/` - Vendor-specific table parsing into `PriceRecord`
//! - `aggregator` - One poll over all sources

pub mod adapter;
pub mod aggregator;
pub mod error;
pub mod html;
pub mod rest;

pub use adapter::{BtmcAdapter, BtmhAdapter, SourceAdapter};
pub use aggregator::*;
pub use error::*;
pub use rest::*;
