// src/fetch/mod.rs

use reqwest::Client;
use tracing::info;

use crate::error::ScrapeError;

/// CPC's published history table of refined fuel prices.
pub static HISTORY_PRICE_URL: &str =
    "https://vipmbr.cpc.com.tw/mbwebs/showhistoryprice_oil.aspx";

/// Fetch the price history page and return its body as UTF-8 text.
pub async fn fetch_history_page(client: &Client) -> Result<String, ScrapeError> {
    info!(url = HISTORY_PRICE_URL, "fetching price history page");
    let html = client
        .get(HISTORY_PRICE_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(html)
}
