use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{annuity_factor, monthly_rate};
use crate::config::FinanceConfig;
use crate::error::HousingFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::HousingFinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    /// Gross annual household income
    pub annual_income: Money,
    /// Existing monthly debt payments (cars, cards, student loans)
    pub monthly_debts: Money,
    /// Down payment as a percentage of price (20 = 20%)
    pub down_payment_pct: Percent,
    /// Annual mortgage rate; falls back to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate_pct: Option<Percent>,
    /// Loan term; falls back to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    /// Largest mortgage payment the debt-to-income limit allows
    pub max_monthly_payment: Money,
    /// Loan that payment services over the term
    pub loan_amount: Money,
    /// Price reachable with that loan and the down payment share
    pub home_price: Money,
    pub down_payment: Money,
}

/// Highest home price a borrower can carry under the debt-to-income limit.
///
/// `None` when existing debts already consume the allowance, or when the
/// down payment share leaves nothing to finance against (100% or more).
pub fn affordable_price(
    config: &FinanceConfig,
    annual_income: Money,
    monthly_debts: Money,
    down_payment_pct: Percent,
    annual_rate_pct: Percent,
    term_years: u32,
) -> Option<AffordabilityOutput> {
    price_limit(
        config,
        annual_income,
        monthly_debts,
        down_payment_pct,
        annual_rate_pct,
        term_years,
    )
    .ok()
}

/// As [`affordable_price`], naming the condition that rules a price out.
fn price_limit(
    config: &FinanceConfig,
    annual_income: Money,
    monthly_debts: Money,
    down_payment_pct: Percent,
    annual_rate_pct: Percent,
    term_years: u32,
) -> HousingFinanceResult<AffordabilityOutput> {
    let monthly_income = annual_income / dec!(12);
    let max_monthly_payment = monthly_income * config.max_debt_to_income - monthly_debts;

    if max_monthly_payment <= Decimal::ZERO {
        return Err(HousingFinanceError::FinancialImpossibility(
            "Not affordable with current debts".into(),
        ));
    }

    let down_share = down_payment_pct / dec!(100);
    if down_share >= Decimal::ONE {
        return Err(HousingFinanceError::InvalidInput {
            field: "down_payment_pct".into(),
            reason: "Down payment must be below 100% of price".into(),
        });
    }

    let rate = monthly_rate(annual_rate_pct);
    let total_payments = term_years.saturating_mul(12);

    let loan_amount = if total_payments == 0 {
        Decimal::ZERO
    } else if rate.is_zero() {
        max_monthly_payment.saturating_mul(Decimal::from(total_payments))
    } else {
        let factor = annuity_factor(rate, total_payments);
        if factor <= Decimal::ZERO {
            return Err(HousingFinanceError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: format!("A rate of {annual_rate_pct}% gives no usable payment factor"),
            });
        }
        max_monthly_payment
            .checked_div(factor)
            .unwrap_or(Decimal::MAX)
    };

    let home_price = loan_amount
        .checked_div(Decimal::ONE - down_share)
        .unwrap_or(Decimal::MAX);
    let down_payment = home_price.saturating_mul(down_share);

    Ok(AffordabilityOutput {
        max_monthly_payment,
        loan_amount,
        home_price,
        down_payment,
    })
}

/// Affordability analysis in the standard output envelope.
///
/// Unlike the pure calculation this reports an unaffordable borrower as an
/// error so the caller has a message to show.
pub fn analyze_affordability(
    config: &FinanceConfig,
    input: &AffordabilityInput,
) -> HousingFinanceResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    config.validate()?;

    let rate = input
        .annual_rate_pct
        .unwrap_or(config.default_annual_rate_pct);
    let term = input.term_years.unwrap_or(config.default_term_years);

    let output = price_limit(
        config,
        input.annual_income,
        input.monthly_debts,
        input.down_payment_pct,
        rate,
        term,
    )?;

    let mut warnings = Vec::new();
    if input.down_payment_pct < dec!(20) {
        warnings.push(format!(
            "Down payment of {}% is below 20% — lenders typically require mortgage insurance",
            input.down_payment_pct
        ));
    }
    if term == 0 {
        warnings.push("Term is zero years — no loan can be serviced".into());
    }

    tracing::debug!(
        max_payment = %output.max_monthly_payment,
        price = %output.home_price,
        "affordability computed"
    );

    Ok(with_metadata(
        "Affordability (debt-to-income limited payment, inverted annuity)",
        input,
        warnings,
        start,
        output,
    ))
}
