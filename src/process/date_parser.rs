// src/process/date_parser.rs

use chrono::NaiveDate;

/// Fast parse of a `"YYYY/MM/DD"` adjustment date.
///
/// Anything that deviates from the fixed format, or names an invalid
/// calendar day, yields `None` rather than an error.
pub fn parse_adjustment_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // minimal length + separators check; slicing below needs ASCII
    if !s.is_ascii() || s.len() < 10 || &s[4..5] != "/" || &s[7..8] != "/" {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[5..7].parse().ok()?;
    let day: u32 = s[8..10].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
