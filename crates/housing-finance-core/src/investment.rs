use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::monthly_payment;
use crate::config::FinanceConfig;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::HousingFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A financed rental property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInput {
    /// Purchase price
    pub price: Money,
    /// Cash paid up front, excluding closing costs
    pub down_payment: Money,
    /// Annual mortgage rate as a percentage (5 = 5%)
    pub annual_rate_pct: Percent,
    /// Gross monthly rent
    pub monthly_rent: Money,
    /// Monthly operating expenses (taxes, insurance, maintenance)
    pub monthly_expenses: Money,
    /// Loan term; falls back to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_years: Option<u32>,
}

/// Return metrics for a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMetrics {
    /// Price less down payment (not clamped at zero)
    pub loan_amount: Money,
    pub monthly_payment: Money,
    /// Rent less expenses less debt service
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    /// Down payment plus closing costs
    pub total_investment: Money,
    /// Annual cash flow / total investment, as a percentage
    pub cash_on_cash_pct: Percent,
    /// Unlevered net annual rent / price, as a percentage
    pub cap_rate_pct: Percent,
}

/// Which side of a two-property comparison wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    First,
    Second,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub first: PropertyInput,
    pub second: PropertyInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub first: PropertyMetrics,
    pub second: PropertyMetrics,
    pub winner: Winner,
    /// First CoC less second CoC, in percentage points
    pub cash_on_cash_spread_pct: Percent,
}

// ---------------------------------------------------------------------------
// Core metrics
// ---------------------------------------------------------------------------

/// Cash flow, cash-on-cash return and cap rate for a financed rental.
///
/// A down payment larger than the price yields a negative loan, which the
/// payment sentinel turns into zero debt service. Both percentage metrics
/// are zero when their denominator is not positive.
pub fn evaluate_property(
    config: &FinanceConfig,
    price: Money,
    down_payment: Money,
    annual_rate_pct: Percent,
    monthly_rent: Money,
    monthly_expenses: Money,
    term_years: u32,
) -> PropertyMetrics {
    let loan_amount = price - down_payment;
    let monthly_payment = monthly_payment(loan_amount, annual_rate_pct, term_years);

    let monthly_cash_flow = (monthly_rent - monthly_expenses).saturating_sub(monthly_payment);
    let annual_cash_flow = monthly_cash_flow.saturating_mul(dec!(12));

    let total_investment = down_payment + price * config.closing_cost_rate;

    let cash_on_cash_pct = if total_investment > Decimal::ZERO {
        // A payment saturated by an extreme rate can push the ratio out of range
        let ratio = annual_cash_flow.checked_div(total_investment).unwrap_or(
            if annual_cash_flow.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            },
        );
        ratio.saturating_mul(dec!(100))
    } else {
        Decimal::ZERO
    };

    let cap_rate_pct = if price > Decimal::ZERO {
        (monthly_rent * dec!(12) - monthly_expenses * dec!(12)) / price * dec!(100)
    } else {
        Decimal::ZERO
    };

    PropertyMetrics {
        loan_amount,
        monthly_payment,
        monthly_cash_flow,
        annual_cash_flow,
        total_investment,
        cash_on_cash_pct,
        cap_rate_pct,
    }
}

/// Evaluate a [`PropertyInput`], defaulting the term from `config`.
pub fn evaluate_input(config: &FinanceConfig, input: &PropertyInput) -> PropertyMetrics {
    evaluate_property(
        config,
        input.price,
        input.down_payment,
        input.annual_rate_pct,
        input.monthly_rent,
        input.monthly_expenses,
        input.term_years.unwrap_or(config.default_term_years),
    )
}

/// The property with the strictly higher cash-on-cash return wins.
/// Exact ties go to the second property.
pub fn compare_properties(first: &PropertyMetrics, second: &PropertyMetrics) -> Winner {
    if first.cash_on_cash_pct > second.cash_on_cash_pct {
        Winner::First
    } else {
        Winner::Second
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rental return analysis for one property.
pub fn analyze_rental(
    config: &FinanceConfig,
    input: &PropertyInput,
) -> HousingFinanceResult<ComputationOutput<PropertyMetrics>> {
    let start = Instant::now();
    config.validate()?;

    let metrics = evaluate_input(config, input);
    let mut warnings = Vec::new();
    property_warnings(input, &metrics, "", &mut warnings);

    tracing::debug!(
        cash_flow = %metrics.monthly_cash_flow,
        coc = %metrics.cash_on_cash_pct,
        "rental property evaluated"
    );

    Ok(with_metadata(
        "Rental ROI (cash-on-cash and cap rate)",
        input,
        warnings,
        start,
        metrics,
    ))
}

/// Side-by-side comparison of two rentals ranked by cash-on-cash return.
pub fn analyze_comparison(
    config: &FinanceConfig,
    input: &ComparisonInput,
) -> HousingFinanceResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();
    config.validate()?;

    let first = evaluate_input(config, &input.first);
    let second = evaluate_input(config, &input.second);

    let mut warnings = Vec::new();
    property_warnings(&input.first, &first, "Property 1: ", &mut warnings);
    property_warnings(&input.second, &second, "Property 2: ", &mut warnings);

    let winner = compare_properties(&first, &second);
    if first.cash_on_cash_pct == second.cash_on_cash_pct {
        warnings.push("Cash-on-cash returns are equal — tie awarded to property 2".into());
    }

    let cash_on_cash_spread_pct = first.cash_on_cash_pct - second.cash_on_cash_pct;

    tracing::debug!(?winner, spread = %cash_on_cash_spread_pct, "properties compared");

    let output = ComparisonOutput {
        first,
        second,
        winner,
        cash_on_cash_spread_pct,
    };

    Ok(with_metadata(
        "Two-property comparison by cash-on-cash return",
        input,
        warnings,
        start,
        output,
    ))
}

fn property_warnings(
    input: &PropertyInput,
    metrics: &PropertyMetrics,
    prefix: &str,
    warnings: &mut Vec<String>,
) {
    if input.price <= Decimal::ZERO {
        warnings.push(format!("{prefix}Price is not positive — cap rate reported as 0"));
    }
    if metrics.loan_amount < Decimal::ZERO {
        warnings.push(format!(
            "{prefix}Down payment exceeds price — no loan, debt service is 0"
        ));
    }
    if metrics.monthly_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "{prefix}Negative monthly cash flow of {:.2}",
            metrics.monthly_cash_flow
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization;

    fn metrics_with_coc(coc: Decimal) -> PropertyMetrics {
        PropertyMetrics {
            loan_amount: Decimal::ZERO,
            monthly_payment: Decimal::ZERO,
            monthly_cash_flow: Decimal::ZERO,
            annual_cash_flow: Decimal::ZERO,
            total_investment: Decimal::ZERO,
            cash_on_cash_pct: coc,
            cap_rate_pct: Decimal::ZERO,
        }
    }

    fn standard_rental() -> PropertyInput {
        PropertyInput {
            price: dec!(300000),
            down_payment: dec!(75000),
            annual_rate_pct: dec!(5),
            monthly_rent: dec!(2000),
            monthly_expenses: dec!(400),
            term_years: None,
        }
    }

    #[test]
    fn test_standard_rental_uses_default_term() {
        let config = FinanceConfig::default();
        let m = evaluate_input(&config, &standard_rental());
        let expected_pmt = amortization::monthly_payment(dec!(225000), dec!(5), 30);
        assert_eq!(m.loan_amount, dec!(225000));
        assert_eq!(m.monthly_payment, expected_pmt);
        assert_eq!(m.monthly_cash_flow, dec!(1600) - expected_pmt);
        assert_eq!(m.annual_cash_flow, m.monthly_cash_flow * dec!(12));
    }

    #[test]
    fn test_total_investment_includes_closing_costs() {
        let config = FinanceConfig::default();
        let m = evaluate_input(&config, &standard_rental());
        // 75000 + 300000 * 0.03
        assert_eq!(m.total_investment, dec!(84000));
    }

    #[test]
    fn test_cap_rate() {
        let config = FinanceConfig::default();
        let m = evaluate_input(&config, &standard_rental());
        // (24000 - 4800) / 300000 * 100 = 6.4
        assert_eq!(m.cap_rate_pct, dec!(6.4));
    }

    #[test]
    fn test_zero_price_guards() {
        let config = FinanceConfig::default();
        let m = evaluate_property(
            &config,
            Decimal::ZERO,
            Decimal::ZERO,
            dec!(5),
            dec!(1000),
            dec!(200),
            30,
        );
        assert_eq!(m.cap_rate_pct, Decimal::ZERO);
        assert_eq!(m.cash_on_cash_pct, Decimal::ZERO);
        assert_eq!(m.monthly_payment, Decimal::ZERO);
    }

    #[test]
    fn test_down_exceeding_price_passes_through() {
        let config = FinanceConfig::default();
        let m = evaluate_property(
            &config,
            dec!(100000),
            dec!(120000),
            dec!(5),
            dec!(1000),
            dec!(200),
            30,
        );
        assert_eq!(m.loan_amount, dec!(-20000));
        assert_eq!(m.monthly_payment, Decimal::ZERO);
        assert_eq!(m.monthly_cash_flow, dec!(800));
    }

    #[test]
    fn test_custom_closing_cost_rate() {
        let config = FinanceConfig {
            closing_cost_rate: Decimal::ZERO,
            ..FinanceConfig::default()
        };
        let m = evaluate_input(&config, &standard_rental());
        assert_eq!(m.total_investment, dec!(75000));
    }

    #[test]
    fn test_explicit_term_overrides_default() {
        let config = FinanceConfig::default();
        let mut input = standard_rental();
        input.term_years = Some(15);
        let m = evaluate_input(&config, &input);
        assert_eq!(
            m.monthly_payment,
            amortization::monthly_payment(dec!(225000), dec!(5), 15)
        );
    }

    #[test]
    fn test_strictly_higher_coc_wins() {
        let a = metrics_with_coc(dec!(7.5));
        let b = metrics_with_coc(dec!(6.0));
        assert_eq!(compare_properties(&a, &b), Winner::First);
        assert_eq!(compare_properties(&b, &a), Winner::Second);
    }

    #[test]
    fn test_tie_goes_to_second() {
        let a = metrics_with_coc(dec!(6.0));
        let b = metrics_with_coc(dec!(6.0));
        assert_eq!(compare_properties(&a, &b), Winner::Second);
    }

    #[test]
    fn test_analyze_rental_warns_on_negative_cash_flow() {
        let config = FinanceConfig::default();
        let mut input = standard_rental();
        input.monthly_rent = dec!(1000);
        let out = analyze_rental(&config, &input).unwrap();
        assert!(out.result.monthly_cash_flow < Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("Negative monthly cash flow")));
    }

    #[test]
    fn test_analyze_rental_rejects_invalid_config() {
        let config = FinanceConfig {
            closing_cost_rate: dec!(2),
            ..FinanceConfig::default()
        };
        assert!(analyze_rental(&config, &standard_rental()).is_err());
    }

    #[test]
    fn test_analyze_comparison_tie_warning() {
        let config = FinanceConfig::default();
        let input = ComparisonInput {
            first: standard_rental(),
            second: standard_rental(),
        };
        let out = analyze_comparison(&config, &input).unwrap();
        assert_eq!(out.result.winner, Winner::Second);
        assert_eq!(out.result.cash_on_cash_spread_pct, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("tie")));
    }

    #[test]
    fn test_extreme_rate_rental_stays_finite() {
        let config = FinanceConfig::default();
        let m = evaluate_property(
            &config,
            dec!(300000),
            dec!(75000),
            dec!(300000),
            dec!(2000),
            dec!(400),
            1,
        );
        // 225000 at a monthly rate of 250 is interest-only
        assert_eq!(m.monthly_payment, dec!(56250000));
        assert!(m.cash_on_cash_pct < Decimal::ZERO);
    }
}
