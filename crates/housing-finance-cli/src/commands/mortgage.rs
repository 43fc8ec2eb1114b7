use clap::Args;
use serde_json::Value;

use housing_finance_core::mortgage::{self, MortgageInput};
use housing_finance_core::FinanceConfig;

use crate::input;
use crate::input::lenient::{Amount, YearCount};

/// Arguments for the monthly mortgage payment
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct MortgageArgs {
    /// Home purchase price
    #[arg(long)]
    pub price: Option<Amount>,

    /// Cash down payment
    #[arg(long, alias = "down")]
    pub down_payment: Option<Amount>,

    /// Annual interest rate in percent (e.g. 4.5)
    #[arg(long)]
    pub rate: Option<Amount>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<YearCount>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(
    args: MortgageArgs,
    config: &FinanceConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = match input::read_input(args.input.as_deref())? {
        Some(value) => value,
        None => MortgageInput {
            home_price: args
                .price
                .map(|a| a.resolve("price"))
                .ok_or("--price is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .map(|a| a.resolve("down_payment"))
                .unwrap_or_default(),
            annual_rate_pct: args.rate.map(|a| a.resolve("rate")),
            term_years: args.years.map(|y| y.resolve("years")),
        },
    };
    let result = mortgage::analyze_mortgage(config, &mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}
