// src/process/table.rs

use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;

/// Element id of the price history grid on the CPC page.
pub static PRICE_TABLE_ID: &str = "MyGridView";

#[derive(Debug)]
pub struct RawTable {
    /// Column labels from the table's `<th>` cells, in document order.
    pub headers: Vec<String>,
    /// Each `<tr>`'s `<td>` cell text, trimmed. Rows without any `<td>`
    /// (the header row, spacer rows) are dropped here.
    pub rows: Vec<Vec<String>>,
}

/// Locate the price history table in `html` and extract its header labels
/// and body rows as trimmed text.
pub fn extract_price_table(html: &str) -> Result<RawTable, ScrapeError> {
    let table_sel = Selector::parse(&format!("table#{}", PRICE_TABLE_ID))
        .expect("CSS selector for the price table should be valid");
    let tr_sel = Selector::parse("tr").expect("CSS selector for rows should be valid");
    let th_sel = Selector::parse("th").expect("CSS selector for header cells should be valid");
    let td_sel = Selector::parse("td").expect("CSS selector for data cells should be valid");

    let doc = Html::parse_document(html);
    let table = doc.select(&table_sel).next().ok_or_else(|| {
        ScrapeError::Parse(format!("table#{} not found in page", PRICE_TABLE_ID))
    })?;

    let headers: Vec<String> = table.select(&th_sel).map(cell_text).collect();

    let mut rows = Vec::new();
    for tr in table.select(&tr_sel) {
        let cells: Vec<String> = tr.select(&td_sel).map(cell_text).collect();
        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}

fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
