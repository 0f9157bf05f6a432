use std::collections::HashSet;
use std::fs;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use oilscraper::{fetch, process, sql};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(about = "Scrape CPC's fuel price history and emit monthly-average SQL inserts")]
struct Args {
    /// Comma-separated list of YYYY/MM periods, e.g. 2024/10,2024/11,2024/12
    periods: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) parse target periods ─────────────────────────────────────
    let args = Args::parse();
    let periods: Vec<String> = args
        .periods
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if periods.is_empty() {
        bail!("no target periods given; expected e.g. 2024/10,2024/11,2024/12");
    }
    info!(?periods, "target periods");

    // ─── 3) fetch + extract the price table ──────────────────────────
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("building HTTP client")?;
    let html = fetch::fetch_history_page(&client).await?;
    let table = process::extract_price_table(&html)?;
    info!(rows = table.rows.len(), "extracted price table");

    // ─── 4) normalize + aggregate ────────────────────────────────────
    let target: HashSet<String> = periods.iter().cloned().collect();
    let records = process::normalize(&table, &target)?;
    let monthly = process::aggregate(&records);
    info!(records = records.len(), months = monthly.len(), "aggregated");

    // ─── 5) render + write ───────────────────────────────────────────
    let now = Local::now();
    let generated_at = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let statements = sql::render_inserts(&monthly, &generated_at);

    let file_name = output_filename(now.date_naive(), &periods);
    fs::write(&file_name, statements.join("\n"))
        .with_context(|| format!("writing {file_name}"))?;
    info!(file = %file_name, statements = statements.len(), "wrote SQL file");

    println!("SQL file generated: {file_name}");
    Ok(())
}

/// `oil_prices_<today>_<periods joined by "_", with "/" as "-">.sql`
fn output_filename(today: NaiveDate, periods: &[String]) -> String {
    let suffix = periods.join("_").replace('/', "-");
    format!("oil_prices_{}_{}.sql", today.format("%Y-%m-%d"), suffix)
}
