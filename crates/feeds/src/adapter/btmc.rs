use goldwatch_core::{PriceRecord, SourceId, NOT_AVAILABLE};

use super::SourceAdapter;
use crate::html;
use crate::FeedError;

/// Bao Tin Minh Chau price table.
///
/// The first `<tbody>` row is a header. Product rows carry a brand logo
/// `<img>` in their first cell, decorative rows don't. Columns are
/// `logo | label | purity | buy | sell`, prices in thousands of VND.
pub struct BtmcAdapter;

fn price_or_na(text: String) -> String {
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text
    }
}

impl SourceAdapter for BtmcAdapter {
    fn source() -> SourceId {
        SourceId::BaoTinMinhChau
    }

    fn parse_page(page: &str) -> Result<PriceRecord, FeedError> {
        let class = Self::source().table_class();
        let table = html::find_by_class(page, "table", class).ok_or(FeedError::TableNotFound(class))?;
        let body = html::first_element(table.inner, "tbody").ok_or(FeedError::MissingSection("tbody"))?;

        for row in html::elements(body.inner, "tr").into_iter().skip(1) {
            let cells = html::elements(row.inner, "td");
            let is_product = cells.first().is_some_and(|c| html::has_tag(c.inner, "img"));
            if !is_product {
                continue;
            }
            if cells.len() < 5 {
                return Err(FeedError::MalformedRow(format!(
                    "expected 5 cells, found {}",
                    cells.len()
                )));
            }
            let label = cells[1].text();
            let buy = price_or_na(cells[3].text());
            let sell = price_or_na(cells[4].text());
            return Ok(PriceRecord::from_raw(Self::source(), label, &buy, &sell));
        }

        Err(FeedError::NoProductRow)
    }
}
