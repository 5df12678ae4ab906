//! Dip Allocator - Main Entry Point
//!
//! Command-line front end: validates the four inputs, runs the allocation
//! and prints the table and summary (or JSON).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dip_allocator::allocation::{compute, weights, AllocationReport, AllocationRequest, PriceLadder};
use dip_allocator::config::{Config, DisplayConfig, LoggingConfig};
use dip_allocator::utils::{format_currency, format_percent};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Dip Allocator CLI
#[derive(Parser)]
#[command(name = "dip-allocator")]
#[command(version, about = "Exponential buy-the-dip capital allocation across a price ladder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate capital across a price ladder
    Allocate {
        /// Lowest purchase price
        #[arg(short, long)]
        low: Decimal,

        /// Highest purchase price
        #[arg(short = 'H', long)]
        high: Decimal,

        /// Price step between ladder levels
        #[arg(short, long)]
        tick: Decimal,

        /// Capital available to deploy
        #[arg(short, long)]
        capital: Decimal,

        /// Shares per board lot (overrides configuration)
        #[arg(long)]
        lot_size: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the price ladder only
    Ladder {
        /// Lowest purchase price
        #[arg(short, long)]
        low: Decimal,

        /// Highest purchase price
        #[arg(short = 'H', long)]
        high: Decimal,

        /// Price step between ladder levels
        #[arg(short, long)]
        tick: Decimal,
    },

    /// Show the exponential weight curve for a ladder length
    Weights {
        /// Number of ladder levels
        #[arg(short = 'n', long, default_value = "5")]
        levels: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Commands::Allocate {
        lot_size: Some(lot_size),
        ..
    } = cli.command
    {
        config.allocation.lot_size = lot_size;
    }
    config.validate()?;

    init_logging(&config.logging)?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Allocate {
            low,
            high,
            tick,
            capital,
            json,
            ..
        } => run_allocate(&config, AllocationRequest::new(low, high, tick, capital), json),
        Commands::Ladder { low, high, tick } => run_ladder(&config, low, high, tick),
        Commands::Weights { levels } => {
            show_weights(levels);
            Ok(())
        }
    }
}

/// Initialize logging to stderr, plus a daily rolling file when configured.
///
/// Stdout is reserved for the report so `--json` output stays parseable.
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match &logging.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {dir}"))?;

            let file_appender = tracing_appender::rolling::daily(dir, "dip-allocator.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            // Leak the guard to keep it alive for the program duration
            Box::leak(Box::new(guard));

            builder
                .with_writer(std::io::stderr.and(file_writer))
                .with_ansi(false)
                .init();
        }
        None => {
            builder.with_writer(std::io::stderr).init();
        }
    }

    Ok(())
}

fn run_allocate(config: &Config, request: AllocationRequest, json: bool) -> Result<()> {
    request
        .validate(config.allocation.max_ladder_levels, config.allocation.lot_size)
        .context("Invalid allocation input")?;

    info!(
        low = %request.low_price,
        high = %request.high_price,
        tick = %request.price_tick,
        capital = %request.available_capital,
        lot_size = config.allocation.lot_size,
        "Calculating allocation"
    );

    let report = compute(&request, config.allocation.lot_size);

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        print_report(&report, &config.display, config.allocation.lot_size);
    }

    Ok(())
}

fn run_ladder(config: &Config, low: Decimal, high: Decimal, tick: Decimal) -> Result<()> {
    // Capital only feeds validation here.
    AllocationRequest::new(low, high, tick, Decimal::ONE)
        .validate(config.allocation.max_ladder_levels, config.allocation.lot_size)
        .context("Invalid ladder input")?;

    let ladder = PriceLadder::generate(low, high, tick);
    info!(levels = ladder.len(), "Price ladder");

    for (idx, price) in ladder.prices().iter().enumerate() {
        println!("{:>4}  {}", idx, format_currency(*price, &config.display));
    }

    Ok(())
}

fn show_weights(levels: usize) {
    let raw = weights::weights(levels);
    let shares = weights::cash_shares(levels);

    println!(
        "Weight curve: {} * {}^({} * (i - 1)), highest price at i = 0",
        weights::A1,
        weights::E,
        weights::K
    );
    println!("{:>4}  {:>14}  {:>9}", "i", "weight", "share");
    for (idx, (weight, share)) in raw.iter().zip(&shares).enumerate() {
        println!("{:>4}  {:>14.6}  {:>8.2}%", idx, weight, share * 100.0);
    }
}

fn print_report(report: &AllocationReport, display: &DisplayConfig, lot_size: u64) {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║                    ALLOCATION TABLE                        ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    if report.rows.is_empty() {
        println!("\n❌ The price range produced no ladder levels.");
        return;
    }

    println!(
        "\n{:>18}  {:>12}  {:>6}  {:>10}  {:>20}  {:>18}",
        "Price per Share", "Allocation %", "Lots", "Shares", "Total Cost", "Avg Purchase Price"
    );
    for row in &report.rows {
        println!(
            "{:>18}  {:>12}  {:>6}  {:>10}  {:>20}  {:>18}",
            format_currency(row.price, display),
            format_percent(row.allocation_percentage, 2),
            row.lots,
            row.shares,
            format_currency(row.total_cost, display),
            format_currency(row.average_purchase_price, display),
        );
    }

    let summary = &report.summary;
    println!("\n📊 Summary");
    println!(
        "   ├─ Total Capital Utilized:       {}",
        format_currency(summary.total_capital_utilized, display)
    );
    println!(
        "   ├─ Remaining Available Cash:     {}",
        format_currency(summary.remaining_cash, display)
    );
    println!(
        "   ├─ Final Average Purchase Price: {}",
        format_currency(summary.weighted_average_price, display)
    );
    println!(
        "   └─ Total Shares:                 {} ({} lot @ {} shares)",
        summary.total_shares, summary.total_lots, lot_size
    );

    if summary.total_lots == 0 {
        println!("\n⚠️  Capital is too small to buy a single lot at any ladder price.");
    }
}
