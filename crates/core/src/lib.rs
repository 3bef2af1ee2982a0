//! Core data types for the gold price watcher.

pub mod price;
pub mod source;

pub use price::*;
pub use source::*;
