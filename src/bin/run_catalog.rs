//! Run DCA projections and ATH predictions for the whole asset catalog
//!
//! Writes one CSV row per projected year and prints an ATH summary per asset

use anyhow::{Context, Result};
use asset_forecast::{
    CsvHistoryProvider, ForecastConfig, ForecastRunner, Frequency, IndicatorSignalProvider,
    ProjectionRequest,
};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_catalog", about = "Batch forecasts for every catalog asset")]
struct Args {
    #[arg(long, default_value = asset_forecast::history::loader::DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    #[arg(long, default_value_t = 100.0)]
    amount: f64,

    #[arg(long, default_value = "monthly")]
    frequency: Frequency,

    #[arg(long, default_value_t = 10)]
    years: u32,

    #[arg(short, long, default_value = "catalog_projection_output.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    asset_id: &'a str,
    model_type: String,
    year: u32,
    total_invested: f64,
    portfolio_value_low: f64,
    portfolio_value_mid: f64,
    portfolio_value_high: f64,
    units_held: f64,
    price_low: f64,
    price_mid: f64,
    price_high: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let config = ForecastConfig::default().apply_env()?;
    let history = CsvHistoryProvider::new(&args.data_dir);
    let signals = IndicatorSignalProvider::new(history.clone());
    let runner = ForecastRunner::new(config, history, signals);

    let requests: Vec<ProjectionRequest> = runner
        .catalog()
        .iter()
        .map(|a| ProjectionRequest::new(&a.id, args.amount, args.frequency, args.years))
        .collect();

    println!("Running {} projections...", requests.len());
    let proj_start = Instant::now();
    let results = runner.run_batch(&requests);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut failed = 0usize;

    for (request, result) in requests.iter().zip(&results) {
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("  {}: {}", request.asset_id, e);
                failed += 1;
                continue;
            }
        };
        for p in &response.projections {
            writer.serialize(OutputRow {
                asset_id: &response.asset_id,
                model_type: response.model_type.to_string(),
                year: p.year,
                total_invested: p.total_invested,
                portfolio_value_low: p.portfolio_value_low,
                portfolio_value_mid: p.portfolio_value_mid,
                portfolio_value_high: p.portfolio_value_high,
                units_held: p.units_held,
                price_low: p.price_low,
                price_mid: p.price_mid,
                price_high: p.price_high,
            })?;
        }
    }
    writer.flush()?;
    println!("Output written to {} ({} failed)", args.output.display(), failed);

    println!("\nATH Summary:");
    for (asset_id, result) in runner.predict_all_at(Utc::now()) {
        match result {
            Ok(r) => println!(
                "  {:<10} ATH={:>12.2}  next={:>12.2}  {} to {}  conf={:.2}",
                asset_id,
                r.current_ath,
                r.predicted_next_ath,
                r.predicted_date_range.earliest,
                r.predicted_date_range.latest,
                r.confidence
            ),
            Err(e) => println!("  {:<10} {}", asset_id, e),
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
