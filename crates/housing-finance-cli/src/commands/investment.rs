use clap::Args;
use serde_json::Value;

use housing_finance_core::investment::{self, ComparisonInput, PropertyInput};
use housing_finance_core::FinanceConfig;

use crate::input;
use crate::input::lenient::{Amount, YearCount};

/// Arguments for rental ROI
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct RentalArgs {
    /// Purchase price
    #[arg(long)]
    pub price: Option<Amount>,

    /// Cash down payment
    #[arg(long, alias = "down")]
    pub down_payment: Option<Amount>,

    /// Annual interest rate in percent (e.g. 5)
    #[arg(long)]
    pub rate: Option<Amount>,

    /// Gross monthly rent
    #[arg(long)]
    pub rent: Option<Amount>,

    /// Monthly operating expenses
    #[arg(long)]
    pub expenses: Option<Amount>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<YearCount>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a two-property comparison
#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct CompareArgs {
    /// Property 1 purchase price
    #[arg(long)]
    pub price1: Option<Amount>,
    /// Property 1 down payment
    #[arg(long)]
    pub down1: Option<Amount>,
    /// Property 1 annual rate in percent
    #[arg(long)]
    pub rate1: Option<Amount>,
    /// Property 1 monthly rent
    #[arg(long)]
    pub rent1: Option<Amount>,
    /// Property 1 monthly expenses
    #[arg(long)]
    pub expenses1: Option<Amount>,

    /// Property 2 purchase price
    #[arg(long)]
    pub price2: Option<Amount>,
    /// Property 2 down payment
    #[arg(long)]
    pub down2: Option<Amount>,
    /// Property 2 annual rate in percent
    #[arg(long)]
    pub rate2: Option<Amount>,
    /// Property 2 monthly rent
    #[arg(long)]
    pub rent2: Option<Amount>,
    /// Property 2 monthly expenses
    #[arg(long)]
    pub expenses2: Option<Amount>,

    /// Loan term in years, applied to both properties
    #[arg(long)]
    pub years: Option<YearCount>,

    /// Path to JSON input file with `first` and `second` properties
    #[arg(long)]
    pub input: Option<String>,
}

struct PropertyFlags<'a> {
    price: Option<&'a Amount>,
    down: Option<&'a Amount>,
    rate: Option<&'a Amount>,
    rent: Option<&'a Amount>,
    expenses: Option<&'a Amount>,
    years: Option<&'a YearCount>,
}

fn property_from_flags(
    flags: PropertyFlags<'_>,
    suffix: &str,
    config: &FinanceConfig,
) -> Result<PropertyInput, Box<dyn std::error::Error>> {
    let required = |value: Option<&Amount>, name: &str| -> Result<_, String> {
        let field = format!("{name}{suffix}");
        value
            .map(|a| a.resolve(&field))
            .ok_or_else(|| format!("--{field} is required (or provide --input)"))
    };

    Ok(PropertyInput {
        price: required(flags.price, "price")?,
        down_payment: flags
            .down
            .map(|a| a.resolve(&format!("down{suffix}")))
            .unwrap_or_default(),
        annual_rate_pct: flags
            .rate
            .map(|a| a.resolve(&format!("rate{suffix}")))
            .unwrap_or(config.default_annual_rate_pct),
        monthly_rent: required(flags.rent, "rent")?,
        monthly_expenses: flags
            .expenses
            .map(|a| a.resolve(&format!("expenses{suffix}")))
            .unwrap_or_default(),
        term_years: flags.years.map(|y| y.resolve("years")),
    })
}

pub fn run_rental(
    args: RentalArgs,
    config: &FinanceConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let property: PropertyInput = match input::read_input(args.input.as_deref())? {
        Some(value) => value,
        None => property_from_flags(
            PropertyFlags {
                price: args.price.as_ref(),
                down: args.down_payment.as_ref(),
                rate: args.rate.as_ref(),
                rent: args.rent.as_ref(),
                expenses: args.expenses.as_ref(),
                years: args.years.as_ref(),
            },
            "",
            config,
        )?,
    };
    let result = investment::analyze_rental(config, &property)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(
    args: CompareArgs,
    config: &FinanceConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison: ComparisonInput = match input::read_input(args.input.as_deref())? {
        Some(value) => value,
        None => ComparisonInput {
            first: property_from_flags(
                PropertyFlags {
                    price: args.price1.as_ref(),
                    down: args.down1.as_ref(),
                    rate: args.rate1.as_ref(),
                    rent: args.rent1.as_ref(),
                    expenses: args.expenses1.as_ref(),
                    years: args.years.as_ref(),
                },
                "1",
                config,
            )?,
            second: property_from_flags(
                PropertyFlags {
                    price: args.price2.as_ref(),
                    down: args.down2.as_ref(),
                    rate: args.rate2.as_ref(),
                    rent: args.rent2.as_ref(),
                    expenses: args.expenses2.as_ref(),
                    years: args.years.as_ref(),
                },
                "2",
                config,
            )?,
        },
    };
    let result = investment::analyze_comparison(config, &comparison)?;
    Ok(serde_json::to_value(result)?)
}
