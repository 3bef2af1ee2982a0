//! Notification text for changed prices.

use chrono::NaiveDateTime;
use goldwatch_core::PriceRecord;

/// Line placed between per-source blocks.
pub const DIVIDER: &str = "\n----------------------\n";

/// Timestamp layout of the footer.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FOOTER_RULE_WIDTH: usize = 72;

/// Options for composing a notification.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    /// Add a `Website:` line with the source page.
    pub include_source_url: bool,
}

/// Render one changed record.
pub fn format_block(record: &PriceRecord, options: &MessageOptions) -> String {
    let mut block = format!(
        "📊 *{} Price Update* 📊\n\
         Type: {}\n\
         Buy Price: {} VND\n\
         Sell Price: {} VND",
        record.source.name(),
        record.product_type,
        record.buy_price,
        record.sell_price
    );
    if options.include_source_url {
        block.push_str(&format!("\nWebsite: {}", record.source.url()));
    }
    block
}

/// Build the notification for `changed`, stamped with `at`.
///
/// Returns `None` for an empty change set; nothing should be sent then.
pub fn compose_at(changed: &[PriceRecord], options: &MessageOptions, at: NaiveDateTime) -> Option<String> {
    if changed.is_empty() {
        return None;
    }
    let blocks: Vec<String> = changed.iter().map(|r| format_block(r, options)).collect();
    let mut message = blocks.join(DIVIDER);
    message.push_str(&format!("\n\nUpdated: {}", at.format(TIMESTAMP_FORMAT)));
    message.push('\n');
    message.push_str(&"_".repeat(FOOTER_RULE_WIDTH));
    Some(message)
}

/// Build the notification stamped with the local wall clock.
pub fn compose(changed: &[PriceRecord], options: &MessageOptions) -> Option<String> {
    compose_at(changed, options, chrono::Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use goldwatch_core::SourceId;
    use pretty_assertions::assert_eq;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    fn records() -> Vec<PriceRecord> {
        vec![
            PriceRecord::from_raw(SourceId::BaoTinManhHai, "SJC 1L", "84500", "86500"),
            PriceRecord::from_raw(SourceId::BaoTinMinhChau, "Vàng miếng", "845", "865"),
        ]
    }

    #[test]
    fn test_empty_change_set_has_no_message() {
        assert!(compose_at(&[], &MessageOptions::default(), at()).is_none());
        assert!(compose(&[], &MessageOptions::default()).is_none());
    }

    #[test]
    fn test_single_block_layout() {
        let message = compose_at(&records()[1..], &MessageOptions::default(), at()).unwrap();
        let expected = format!(
            "📊 *Bao Tin Minh Chau Price Update* 📊\n\
             Type: Vàng miếng\n\
             Buy Price: 845.000 VND\n\
             Sell Price: 865.000 VND\n\
             \n\
             Updated: 2025-03-14 09:05:07\n\
             {}",
            "_".repeat(72)
        );
        assert_eq!(message, expected);
    }

    #[test]
    fn test_blocks_joined_with_divider_in_order() {
        let message = compose_at(&records(), &MessageOptions::default(), at()).unwrap();
        let (first, rest) = message.split_once(DIVIDER).unwrap();
        assert!(first.starts_with("📊 *Bao Tin Manh Hai Price Update*"));
        assert!(first.ends_with("Sell Price: 86.500 VND"));
        assert!(rest.starts_with("📊 *Bao Tin Minh Chau Price Update*"));
        assert_eq!(message.matches(DIVIDER).count(), 1);
    }

    #[test]
    fn test_source_url_line() {
        let options = MessageOptions {
            include_source_url: true,
        };
        let block = format_block(&records()[0], &options);
        assert!(block.ends_with("\nWebsite: https://www.baotinmanhhai.vn"));

        let block = format_block(&records()[0], &MessageOptions::default());
        assert!(!block.contains("Website:"));
    }
}
