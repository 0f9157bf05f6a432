// src/process/aggregate.rs

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::process::normalize::PriceRecord;

/// Mean price per grade for one calendar month. A field is `None` only when
/// every contributing record was missing that grade.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAverage {
    pub year: i32,
    pub month: u32,
    pub avg_92: Option<f64>,
    pub avg_95: Option<f64>,
    pub avg_98: Option<f64>,
    pub avg_diesel: Option<f64>,
}

#[derive(Default)]
struct MeanAccum {
    sum: f64,
    n: u32,
}

impl MeanAccum {
    fn push(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.sum += v;
            self.n += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.n > 0).then(|| round2(self.sum / self.n as f64))
    }
}

#[derive(Default)]
struct MonthAccum {
    p92: MeanAccum,
    p95: MeanAccum,
    p98: MeanAccum,
    diesel: MeanAccum,
}

/// Group `records` by calendar month and average each grade over its
/// non-missing values. Undated records are skipped. Output is ordered
/// month-ascending, one entry per month present in the input.
pub fn aggregate(records: &[PriceRecord]) -> Vec<MonthlyAverage> {
    let mut months: BTreeMap<(i32, u32), MonthAccum> = BTreeMap::new();

    for record in records {
        let Some(date) = record.date else { continue };
        let accum = months.entry((date.year(), date.month())).or_default();
        accum.p92.push(record.price_92);
        accum.p95.push(record.price_95);
        accum.p98.push(record.price_98);
        accum.diesel.push(record.price_diesel);
    }

    months
        .into_iter()
        .map(|((year, month), accum)| MonthlyAverage {
            year,
            month,
            avg_92: accum.p92.mean(),
            avg_95: accum.p95.mean(),
            avg_98: accum.p98.mean(),
            avg_diesel: accum.diesel.mean(),
        })
        .collect()
}

/// Round to 2 decimal places, ties to even (banker's rounding):
/// an exact half like 2.125 rounds to 2.12, not 2.13.
fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
