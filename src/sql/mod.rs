// src/sql/mod.rs

use uuid::Uuid;

use crate::process::aggregate::MonthlyAverage;

/// Target table for the generated statements.
pub static OIL_PRICES_TABLE: &str = "otdb064_oil_prices";

static OIL_UNIT: &str = "公升";

/// Display label per grade, in the fixed emission order 92, 95, 98, diesel.
fn fuel_columns(row: &MonthlyAverage) -> [(&'static str, Option<f64>); 4] {
    [
        ("92無鉛汽油", row.avg_92),
        ("95無鉛汽油", row.avg_95),
        ("98無鉛汽油", row.avg_98),
        ("超級柴油", row.avg_diesel),
    ]
}

/// Render one INSERT per (month, grade) pair with a non-missing average,
/// preserving the input month order and the fixed grade order.
///
/// `generated_at` is captured once by the caller so every statement of a run
/// shares the same created_at/updated_at; `next_id` mints one identifier per
/// statement, injected so tests can supply a deterministic generator.
///
/// No escaping is applied: every interpolated value is a number or a fixed
/// label. A free-text column must not be added here without adding quoting.
pub fn render_inserts_with(
    rows: &[MonthlyAverage],
    generated_at: &str,
    mut next_id: impl FnMut() -> String,
) -> Vec<String> {
    let mut statements = Vec::new();
    for row in rows {
        for (oil_type, price) in fuel_columns(row) {
            let Some(price) = price else { continue };
            statements.push(format!(
                "INSERT INTO {table} (id, oil_year, oil_month, oil_type, oil_unit, \
                 oil_price, delete_flag, options_system, options_user, created_at, \
                 updated_at, created_by, updated_by) \
                 VALUES ('{id}', {year}, {month}, '{oil_type}', '{unit}', {price}, \
                 0, '', '', '{ts}', '{ts}', 'admin', 'admin');",
                table = OIL_PRICES_TABLE,
                id = next_id(),
                year = row.year,
                month = row.month,
                unit = OIL_UNIT,
                ts = generated_at,
            ));
        }
    }
    statements
}

/// [`render_inserts_with`] using freshly minted UUIDv4 identifiers.
pub fn render_inserts(rows: &[MonthlyAverage], generated_at: &str) -> Vec<String> {
    render_inserts_with(rows, generated_at, || Uuid::new_v4().to_string())
}
