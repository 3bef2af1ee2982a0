//! Price source identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gold price vendor.
///
/// Each vendor has its own page markup and quotes prices in its own unit,
/// so the identity carries the URL, the table to look for and the scale
/// applied before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceId {
    /// Bao Tin Manh Hai
    BaoTinManhHai,
    /// Bao Tin Minh Chau
    BaoTinMinhChau,
}

impl SourceId {
    /// All sources in poll order.
    pub const ALL: [SourceId; 2] = [SourceId::BaoTinManhHai, SourceId::BaoTinMinhChau];

    /// Human readable vendor name used in notifications.
    pub fn name(self) -> &'static str {
        match self {
            SourceId::BaoTinManhHai => "Bao Tin Manh Hai",
            SourceId::BaoTinMinhChau => "Bao Tin Minh Chau",
        }
    }

    /// Short code used in logs.
    pub fn code(self) -> &'static str {
        match self {
            SourceId::BaoTinManhHai => "BTMH",
            SourceId::BaoTinMinhChau => "BTMC",
        }
    }

    /// Page that lists the vendor's prices.
    pub fn url(self) -> &'static str {
        match self {
            SourceId::BaoTinManhHai => "https://www.baotinmanhhai.vn",
            SourceId::BaoTinMinhChau => "https://btmc.vn",
        }
    }

    /// Class token of the `<table>` holding the price rows.
    pub fn table_class(self) -> &'static str {
        match self {
            SourceId::BaoTinManhHai => "gold-table-content",
            SourceId::BaoTinMinhChau => "bd_price_home",
        }
    }

    /// Multiplier applied to the quoted number before display.
    /// BTMC quotes in thousands of VND.
    pub fn price_scale(self) -> u64 {
        match self {
            SourceId::BaoTinManhHai => 1,
            SourceId::BaoTinMinhChau => 1000,
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
