// src/error.rs

/// Failure modes of the scrape pipeline.
///
/// Cell-level conversion failures (a bad date, a blank price) are not
/// errors: the source table is known to contain sparse entries, so those
/// degrade to `None` and are excluded from aggregation.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Transport-level or HTTP-status failure retrieving the price page.
    #[error("fetching price history page: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The page no longer carries the structure the parser expects.
    #[error("parsing price history page: {0}")]
    Parse(String),

    /// A required column label is missing from the live table header,
    /// meaning the upstream page format has changed.
    #[error("column `{0}` missing from price table header")]
    Schema(String),
}
