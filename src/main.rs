//! Asset Forecast CLI
//!
//! Command-line interface for DCA projections and ATH predictions

use anyhow::{Context, Result};
use asset_forecast::{
    CsvHistoryProvider, ForecastConfig, ForecastRunner, Frequency, IndicatorSignalProvider,
    ProjectionRequest,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "asset-forecast", about = "DCA projections and all-time-high predictions")]
struct Cli {
    /// Directory holding <asset_id>.csv history files
    #[arg(long, default_value = asset_forecast::history::loader::DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// JSON config overriding the default calibration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate periodic purchases over projected prices
    Project {
        #[arg(short, long)]
        asset: String,
        #[arg(long)]
        amount: f64,
        #[arg(short, long, default_value = "monthly")]
        frequency: Frequency,
        #[arg(short, long, default_value_t = 5)]
        years: u32,
    },
    /// Predict the next all-time high
    Ath {
        #[arg(short, long)]
        asset: String,
    },
    /// List supported assets
    Assets,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ForecastConfig::from_json_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ForecastConfig::default(),
    }
    .apply_env()
    .context("applying FORECAST_* overrides")?;

    let history = CsvHistoryProvider::new(&cli.data_dir);
    let signals = IndicatorSignalProvider::new(history.clone());
    let runner = ForecastRunner::new(config, history, signals);

    match cli.command {
        Command::Project { asset, amount, frequency, years } => {
            let request = ProjectionRequest::new(&asset, amount, frequency, years);
            let response = runner
                .project(&request)
                .with_context(|| format!("projecting {}", asset))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            println!(
                "{} ({}) - {} {:.2} for {} years",
                response.asset_name, response.model_type, response.frequency, response.amount_per_period, response.duration_years
            );
            println!(
                "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14} {:>12}",
                "Year", "Invested", "Value Low", "Value Mid", "Value High", "Units", "Price Mid"
            );
            println!("{}", "-".repeat(94));
            for p in &response.projections {
                println!(
                    "{:>4} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.6} {:>12.2}",
                    p.year,
                    p.total_invested,
                    p.portfolio_value_low,
                    p.portfolio_value_mid,
                    p.portfolio_value_high,
                    p.units_held,
                    p.price_mid,
                );
            }
            println!("\n{}", response.disclaimer);
        }
        Command::Ath { asset } => {
            let response = runner
                .predict_ath(&asset)
                .with_context(|| format!("predicting ATH for {}", asset))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            println!("{}", response.asset_name);
            println!("  Current price:      {:.2}", response.current_price);
            println!("  Current ATH:        {:.2}", response.current_ath);
            println!("  Predicted next ATH: {:.2}", response.predicted_next_ath);
            println!(
                "  Expected window:    {} to {}",
                response.predicted_date_range.earliest, response.predicted_date_range.latest
            );
            println!("  Confidence:         {:.2}", response.confidence);
            println!("  Factors:");
            for factor in &response.factors {
                println!("    - {}", factor);
            }
            println!("\n{}", response.disclaimer);
        }
        Command::Assets => {
            for asset in runner.catalog().iter() {
                println!("{:<10} {:<18} {:<6} {}", asset.id, asset.name, asset.symbol, asset.class);
            }
        }
    }

    Ok(())
}
