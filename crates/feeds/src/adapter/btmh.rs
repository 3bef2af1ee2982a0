use goldwatch_core::{PriceRecord, SourceId};

use super::SourceAdapter;
use crate::html::{self, Element};
use crate::FeedError;

/// Bao Tin Manh Hai price table.
///
/// Rows in `<tbody>` read `label | buy | sell`, prices already in VND with
/// `.` grouping and sometimes a trailing unit.
pub struct BtmhAdapter;

/// Cleaned price cell: separators removed, first word only.
fn price_token(cell: &Element<'_>) -> Result<String, FeedError> {
    let text = cell.text().replace('.', "");
    text.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| FeedError::MalformedRow("empty price cell".to_string()))
}

impl SourceAdapter for BtmhAdapter {
    fn source() -> SourceId {
        SourceId::BaoTinManhHai
    }

    fn parse_page(page: &str) -> Result<PriceRecord, FeedError> {
        let class = Self::source().table_class();
        let table = html::find_by_class(page, "table", class).ok_or(FeedError::TableNotFound(class))?;
        let body = html::first_element(table.inner, "tbody").ok_or(FeedError::MissingSection("tbody"))?;

        for row in html::elements(body.inner, "tr") {
            let cells = html::elements(row.inner, "td");
            if cells.len() < 3 {
                continue;
            }
            let label = cells[0].text();
            let buy = price_token(&cells[1])?;
            let sell = price_token(&cells[2])?;
            return Ok(PriceRecord::from_raw(Self::source(), label, &buy, &sell));
        }

        Err(FeedError::NoProductRow)
    }
}
