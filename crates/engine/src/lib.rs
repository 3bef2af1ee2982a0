//! Price change detection.
//!
//! Compares each poll's records against the last seen price per source.

pub mod detector;
pub mod state;

pub use detector::*;
pub use state::*;
