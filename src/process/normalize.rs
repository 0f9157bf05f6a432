// src/process/normalize.rs

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ScrapeError;
use crate::process::date_parser::parse_adjustment_date;
use crate::process::table::RawTable;

/// Header labels the pipeline depends on, as published on the CPC page.
/// Order matters: date first, then the four grades.
pub static TARGET_COLUMNS: [&str; 5] = [
    "調價日期",
    "無鉛汽油92",
    "無鉛汽油95",
    "無鉛汽油98",
    "超級/高級柴油",
];

/// One price adjustment row, typed. Every field is independently nullable;
/// a record with no date never reaches an aggregation group.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub date: Option<NaiveDate>,
    pub price_92: Option<f64>,
    pub price_95: Option<f64>,
    pub price_98: Option<f64>,
    pub price_diesel: Option<f64>,
}

/// Select the target columns from `table`, coerce cells to typed values,
/// and keep only rows falling in `target_periods` (`"YYYY/MM"` strings;
/// an empty set keeps every row).
///
/// A target label missing from the live header fails with
/// [`ScrapeError::Schema`]: that means the upstream page format changed and
/// must not be papered over. Unparsable cells merely become `None`.
pub fn normalize(
    table: &RawTable,
    target_periods: &HashSet<String>,
) -> Result<Vec<PriceRecord>, ScrapeError> {
    let idx: Vec<usize> = TARGET_COLUMNS
        .iter()
        .map(|label| {
            table
                .headers
                .iter()
                .position(|h| h == label)
                .ok_or_else(|| ScrapeError::Schema((*label).to_string()))
        })
        .collect::<Result<_, _>>()?;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        // a short row simply has no value in the trailing columns
        let cell = |i: usize| row.get(idx[i]).map(String::as_str).unwrap_or("");

        let date = parse_adjustment_date(cell(0));
        if date.is_none() && !cell(0).is_empty() {
            debug!(cell = cell(0), "unparsable adjustment date");
        }

        let record = PriceRecord {
            date,
            price_92: parse_price(cell(1)),
            price_95: parse_price(cell(2)),
            price_98: parse_price(cell(3)),
            price_diesel: parse_price(cell(4)),
        };

        if !target_periods.is_empty() {
            match record.date {
                Some(d) if target_periods.contains(&d.format("%Y/%m").to_string()) => {}
                _ => continue,
            }
        }
        records.push(record);
    }

    Ok(records)
}

fn parse_price(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    fn periods(ps: &[&str]) -> HashSet<String> {
        ps.iter().map(|s| s.to_string()).collect()
    }

    // the live page carries more columns than we consume; keep a decoy
    fn full_header() -> Vec<&'static str> {
        vec![
            "調價日期",
            "無鉛汽油92",
            "無鉛汽油95",
            "無鉛汽油98",
            "超級/高級柴油",
            "二行程無鉛",
        ]
    }

    #[test]
    fn types_cells_and_keeps_column_order() {
        let t = table(
            &full_header(),
            &[&["2024/11/04", "29.8", "31.3", "33.3", "28.5", "31.1"]],
        );
        let records = normalize(&t, &HashSet::new()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 11, 4));
        assert_eq!(r.price_92, Some(29.8));
        assert_eq!(r.price_95, Some(31.3));
        assert_eq!(r.price_98, Some(33.3));
        assert_eq!(r.price_diesel, Some(28.5));
    }

    #[test]
    fn selects_columns_by_label_not_position() {
        // same columns, shuffled
        let t = table(
            &["無鉛汽油95", "調價日期", "超級/高級柴油", "無鉛汽油92", "無鉛汽油98"],
            &[&["31.3", "2024/11/04", "28.5", "29.8", "33.3"]],
        );
        let r = &normalize(&t, &HashSet::new()).unwrap()[0];
        assert_eq!(r.price_92, Some(29.8));
        assert_eq!(r.price_95, Some(31.3));
        assert_eq!(r.price_98, Some(33.3));
        assert_eq!(r.price_diesel, Some(28.5));
    }

    #[test]
    fn missing_label_is_a_schema_error() {
        let t = table(
            &["調價日期", "無鉛汽油92", "無鉛汽油95", "無鉛汽油98"],
            &[&["2024/11/04", "29.8", "31.3", "33.3"]],
        );
        let err = normalize(&t, &HashSet::new()).unwrap_err();
        match err {
            ScrapeError::Schema(label) => assert_eq!(label, "超級/高級柴油"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn bad_cells_degrade_to_none() {
        let t = table(
            &full_header(),
            &[&["公告日", "n/a", "", "33.3", "28.5", ""]],
        );
        let r = &normalize(&t, &HashSet::new()).unwrap()[0];
        assert_eq!(r.date, None);
        assert_eq!(r.price_92, None);
        assert_eq!(r.price_95, None);
        assert_eq!(r.price_98, Some(33.3));
    }

    #[test]
    fn short_rows_degrade_to_none() {
        let t = table(&full_header(), &[&["2024/11/04", "29.8"]]);
        let r = &normalize(&t, &HashSet::new()).unwrap()[0];
        assert_eq!(r.price_92, Some(29.8));
        assert_eq!(r.price_95, None);
        assert_eq!(r.price_diesel, None);
    }

    #[test]
    fn period_filter_keeps_only_matching_months() {
        let t = table(
            &full_header(),
            &[
                &["2024/10/07", "29.6", "31.1", "33.1", "28.3", ""],
                &["2024/11/04", "29.8", "31.3", "33.3", "28.5", ""],
                &["2024/12/02", "30.0", "31.5", "33.5", "28.7", ""],
            ],
        );
        let records = normalize(&t, &periods(&["2024/10"])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 10, 7));
    }

    #[test]
    fn period_filter_drops_undated_rows() {
        let t = table(
            &full_header(),
            &[
                &["", "29.8", "31.3", "33.3", "28.5", ""],
                &["2024/10/07", "29.6", "31.1", "33.1", "28.3", ""],
            ],
        );
        let records = normalize(&t, &periods(&["2024/10"])).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_period_set_keeps_all_rows() {
        let t = table(
            &full_header(),
            &[
                &["2024/10/07", "29.6", "31.1", "33.1", "28.3", ""],
                &["", "29.8", "31.3", "33.3", "28.5", ""],
            ],
        );
        let records = normalize(&t, &HashSet::new()).unwrap();
        assert_eq!(records.len(), 2);
    }
}
