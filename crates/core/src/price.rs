//! Price records and display formatting.

use crate::SourceId;
use serde::{Deserialize, Serialize};

/// Thousands separator used in VND display strings.
pub const GROUP_SEPARATOR: char = '.';

/// Display value used when a vendor leaves a price cell blank.
pub const NOT_AVAILABLE: &str = "N/A";

/// A price rendered for display, with the numeric value it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPrice {
    pub display: String,
    /// Scaled value, `None` when the input held no usable number.
    pub value: Option<u64>,
}

/// Parse the digits of `raw` and apply `scale`.
///
/// Every non-digit character is dropped first, so `"84.500"` and
/// `"84,500 VND"` both read as `84500`. Returns `None` when no digits remain
/// or the scaled value does not fit in a `u64`.
pub fn parse_price(raw: &str, scale: u64) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()?.checked_mul(scale)
}

/// Render a number with `.` between groups of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Remove group separators from a display string.
pub fn strip_separators(display: &str) -> String {
    display.chars().filter(|&c| c != GROUP_SEPARATOR).collect()
}

/// Format a raw price cell for display.
///
/// Malformed input is returned unchanged so it shows up in the notification
/// as-is instead of failing the cycle.
pub fn format_price(raw: &str, scale: u64) -> String {
    format_price_value(raw, scale).display
}

/// Like [`format_price`], keeping the numeric value alongside the display string.
pub fn format_price_value(raw: &str, scale: u64) -> FormattedPrice {
    match parse_price(raw, scale) {
        Some(value) => FormattedPrice {
            display: group_thousands(value),
            value: Some(value),
        },
        None => FormattedPrice {
            display: raw.to_string(),
            value: None,
        },
    }
}

/// Headline price of one product from one vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub source: SourceId,
    /// Product label as the vendor shows it.
    #[serde(rename = "type")]
    pub product_type: String,
    pub buy_price: String,
    pub sell_price: String,
    #[serde(default)]
    pub buy_value: Option<u64>,
    #[serde(default)]
    pub sell_value: Option<u64>,
}

impl PriceRecord {
    /// Build a record from raw cell text, formatting both prices with the
    /// source's scale.
    pub fn from_raw(source: SourceId, product_type: impl Into<String>, buy_raw: &str, sell_raw: &str) -> Self {
        let scale = source.price_scale();
        let buy = format_price_value(buy_raw, scale);
        let sell = format_price_value(sell_raw, scale);
        Self {
            source,
            product_type: product_type.into(),
            buy_price: buy.display,
            sell_price: sell.display,
            buy_value: buy.value,
            sell_value: sell.value,
        }
    }

    /// Equal as displayed: same label and same formatted prices.
    pub fn same_display(&self, other: &PriceRecord) -> bool {
        self.product_type == other.product_type
            && self.buy_price == other.buy_price
            && self.sell_price == other.sell_price
    }

    /// Equal by numeric value where both sides have one, by display text otherwise.
    pub fn same_value(&self, other: &PriceRecord) -> bool {
        fn side(a: Option<u64>, b: Option<u64>, a_text: &str, b_text: &str) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a == b,
                _ => a_text == b_text,
            }
        }
        self.product_type == other.product_type
            && side(self.buy_value, other.buy_value, &self.buy_price, &other.buy_price)
            && side(self.sell_value, other.sell_value, &self.sell_price, &other.sell_price)
    }
}
