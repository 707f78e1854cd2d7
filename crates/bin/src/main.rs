//! Fundsheet CLI binary.
//!
//! Builds a fundamentals workbook for a list of stocks and lists the ratio
//! catalog.

mod integration;

use clap::{Parser, Subcommand};
use fundsheet::TickerList;
use fundsheet_data::sharadar::{SharadarClient, SharadarCsvSource};
use fundsheet_data::{Database, Dimension, FundamentalsSource};
use fundsheet_output::{SummaryIndicator, default_indicators};
use fundsheet_ratios::catalog::raw_fields;
use fundsheet_ratios::{RatioCategory, RatioEngine, ratios_by_category};
use indicatif::{ProgressBar, ProgressStyle};
use integration::pipeline::{Pipeline, PipelineError, RunConfig};
use integration::prompt::confirm_overwrite;
use std::path::PathBuf;
use std::process;
use std::time::Duration as StdDuration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fundsheet")]
#[command(about = "Sharadar fundamentals and credit ratios to xlsx", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a workbook of statements and ratios
    Xlsx {
        /// File with one ticker per line
        #[arg(short = 'i', long, conflicts_with = "ticker", required_unless_present = "ticker")]
        input_file: Option<PathBuf>,

        /// A single ticker
        #[arg(short, long)]
        ticker: Option<String>,

        /// Output workbook
        #[arg(short, long, default_value = "stocks.xlsx")]
        outfile: PathBuf,

        /// Number of periods to include
        #[arg(short, long, default_value = "5")]
        years: usize,

        /// Sharadar database tier (SF0 or SF1)
        #[arg(short, long, default_value = "SF0")]
        database: Database,

        /// Reporting dimension (MRY, ARY, MRT, ART, MRQ, ARQ)
        #[arg(long, default_value = "MRY")]
        dimension: Dimension,

        /// Comma-separated ratio codes, defaults to the full catalog
        #[arg(long, value_delimiter = ',')]
        ratios: Option<Vec<String>>,

        /// Read a Sharadar SF1 bulk CSV export instead of the API
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Overwrite the output file without asking
        #[arg(long)]
        force: bool,
    },

    /// List the calculated ratios
    Ratios {
        /// Only show one category
        #[arg(long)]
        category: Option<RatioCategory>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> Result<(), PipelineError> {
    match command {
        Commands::Xlsx {
            input_file,
            ticker,
            outfile,
            years,
            database,
            dimension,
            ratios,
            csv,
            force,
        } => {
            let tickers = match (input_file, ticker) {
                (Some(path), _) => TickerList::from_file(path)?,
                (None, Some(ticker)) => TickerList::single(&ticker)?,
                (None, None) => TickerList::default(),
            };

            let engine = match ratios {
                Some(codes) => RatioEngine::from_codes(codes.as_slice())?,
                None => RatioEngine::with_all_ratios()?,
            };

            if outfile.exists() && !force {
                let stdin = std::io::stdin();
                if !confirm_overwrite(&outfile, &mut stdin.lock(), &mut std::io::stdout())? {
                    println!("Not overwriting {}", outfile.display());
                    return Ok(());
                }
            }

            let config = RunConfig {
                outfile,
                dimension,
                periods: years,
            };

            match csv {
                Some(path) => write_workbook(SharadarCsvSource::new(path), engine, &tickers, &config).await,
                None => {
                    let client = SharadarClient::from_env(database)?;
                    write_workbook(client, engine, &tickers, &config).await
                }
            }
        }
        Commands::Ratios { category } => {
            list_ratios(category);
            Ok(())
        }
    }
}

async fn write_workbook<S: FundamentalsSource>(
    source: S,
    engine: RatioEngine,
    tickers: &TickerList,
    config: &RunConfig,
) -> Result<(), PipelineError> {
    let indicators = summary_indicators(&engine);
    let pipeline = Pipeline::new(source, engine, indicators);

    let pb = ProgressBar::new(tickers.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(StdDuration::from_millis(100));

    match pipeline.run(tickers, config, Some(&pb)).await {
        Ok(report) => {
            pb.finish_with_message(format!(
                "Wrote {} ({} processed, {} skipped)",
                config.outfile.display(),
                report.processed.len(),
                report.skipped.len()
            ));
            Ok(())
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            Err(e)
        }
    }
}

/// Default summary indicators that the engine or the raw statements provide.
fn summary_indicators(engine: &RatioEngine) -> Vec<SummaryIndicator> {
    default_indicators()
        .into_iter()
        .filter(|indicator| {
            let code = indicator.code.as_str();
            engine.catalog().iter().any(|kind| kind.code() == code) || raw_fields().any(|field| field == code)
        })
        .collect()
}

fn list_ratios(category: Option<RatioCategory>) {
    let categories = category.map_or_else(|| RatioCategory::ALL.to_vec(), |c| vec![c]);

    for category in categories {
        println!("{category}");
        println!("{}", "=".repeat(category.name().len()));
        for info in ratios_by_category(category) {
            println!("  {:<48} {}", info.code, info.description);
            if !info.depends_on.is_empty() {
                println!("  {:<48} depends on: {}", "", info.depends_on.join(", "));
            }
        }
        println!();
    }
}
