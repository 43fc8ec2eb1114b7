mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use housing_finance_core::FinanceConfig;

use commands::affordability::AffordabilityArgs;
use commands::investment::{CompareArgs, RentalArgs};
use commands::mortgage::MortgageArgs;
use commands::schedule::ScheduleArgs;

/// Mortgage, affordability, rental ROI and amortization calculations
#[derive(Parser)]
#[command(
    name = "hfin",
    version,
    about = "Mortgage, affordability, rental ROI and amortization calculations",
    long_about = "A CLI for personal real-estate finance with decimal precision. \
                  Computes mortgage payments, affordable home prices, rental \
                  cash-on-cash returns and cap rates, two-property comparisons \
                  and full amortization schedules with CSV export."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON file overriding calculation defaults (term, closing costs, rate)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log calculation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment for a home price and down payment
    Mortgage(MortgageArgs),
    /// Highest affordable home price from income and debts
    Affordability(AffordabilityArgs),
    /// Cash flow, cash-on-cash return and cap rate for a rental
    Rental(RentalArgs),
    /// Compare two rentals by cash-on-cash return
    Compare(CompareArgs),
    /// Payment-by-payment amortization schedule
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&str>) -> Result<FinanceConfig, Box<dyn std::error::Error>> {
    let config: FinanceConfig = match path {
        Some(p) => input::file::read_json(p)?,
        None => FinanceConfig::default(),
    };
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args, &config),
        Commands::Affordability(args) => commands::affordability::run_affordability(args, &config),
        Commands::Rental(args) => commands::investment::run_rental(args, &config),
        Commands::Compare(args) => commands::investment::run_compare(args, &config),
        Commands::Schedule(args) => commands::schedule::run_schedule(args, &config),
        Commands::Version => {
            println!("hfin {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
