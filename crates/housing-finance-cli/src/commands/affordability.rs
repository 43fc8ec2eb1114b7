use clap::Args;
use serde_json::Value;

use housing_finance_core::affordability::{self, AffordabilityInput};
use housing_finance_core::FinanceConfig;

use crate::input;
use crate::input::lenient::{Amount, YearCount};

/// Arguments for the affordable home price
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct AffordabilityArgs {
    /// Gross annual income
    #[arg(long)]
    pub income: Option<Amount>,

    /// Existing monthly debt payments
    #[arg(long)]
    pub debts: Option<Amount>,

    /// Down payment as a percent of price (e.g. 20)
    #[arg(long, default_value = "20")]
    pub down_pct: Amount,

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

pub fn run_affordability(
    args: AffordabilityArgs,
    config: &FinanceConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input: AffordabilityInput = match input::read_input(args.input.as_deref())? {
        Some(value) => value,
        None => AffordabilityInput {
            annual_income: args
                .income
                .map(|a| a.resolve("income"))
                .ok_or("--income is required (or provide --input)")?,
            monthly_debts: args
                .debts
                .map(|a| a.resolve("debts"))
                .unwrap_or_default(),
            down_payment_pct: args.down_pct.resolve("down_pct"),
            annual_rate_pct: args.rate.map(|a| a.resolve("rate")),
            term_years: args.years.map(|y| y.resolve("years")),
        },
    };
    let result = affordability::analyze_affordability(config, &afford_input)?;
    Ok(serde_json::to_value(result)?)
}
