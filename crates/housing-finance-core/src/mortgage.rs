use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::monthly_payment;
use crate::config::FinanceConfig;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::HousingFinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub home_price: Money,
    pub down_payment: Money,
    /// Annual rate; falls back to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate_pct: Option<Percent>,
    /// Loan term; falls back to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    /// Payment times number of payments
    pub total_paid: Money,
    pub total_interest: Money,
    pub loan_to_value_pct: Percent,
}

/// Monthly payment and lifetime cost for a home purchase.
pub fn analyze_mortgage(
    config: &FinanceConfig,
    input: &MortgageInput,
) -> HousingFinanceResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    config.validate()?;

    let mut warnings: Vec<String> = Vec::new();

    let rate = input
        .annual_rate_pct
        .unwrap_or(config.default_annual_rate_pct);
    let term = input.term_years.unwrap_or(config.default_term_years);

    let loan_amount = input.home_price - input.down_payment;
    let payment = monthly_payment(loan_amount, rate, term);

    let total_paid = payment.saturating_mul(Decimal::from(term.saturating_mul(12)));
    let total_interest = if loan_amount > Decimal::ZERO {
        total_paid - loan_amount
    } else {
        Decimal::ZERO
    };

    let loan_to_value_pct = if input.home_price > Decimal::ZERO {
        loan_amount / input.home_price * dec!(100)
    } else {
        Decimal::ZERO
    };

    if loan_amount <= Decimal::ZERO {
        warnings.push("Down payment covers the price — no loan required".into());
    }
    if loan_to_value_pct > dec!(80) {
        warnings.push(format!(
            "LTV of {loan_to_value_pct:.1}% exceeds 80% — mortgage insurance likely"
        ));
    }

    tracing::debug!(loan = %loan_amount, payment = %payment, "mortgage payment computed");

    let output = MortgageOutput {
        loan_amount,
        monthly_payment: payment,
        total_paid,
        total_interest,
        loan_to_value_pct,
    };

    Ok(with_metadata(
        "Fixed-rate mortgage payment (standard annuity)",
        input,
        warnings,
        start,
        output,
    ))
}
