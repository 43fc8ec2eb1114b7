use housing_finance_core::amortization;
use housing_finance_core::investment::{
    self, ComparisonInput, PropertyInput, PropertyMetrics, Winner,
};
use housing_finance_core::FinanceConfig;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn property(
    price: Decimal,
    down: Decimal,
    rate: Decimal,
    rent: Decimal,
    expenses: Decimal,
) -> PropertyInput {
    PropertyInput {
        price,
        down_payment: down,
        annual_rate_pct: rate,
        monthly_rent: rent,
        monthly_expenses: expenses,
        term_years: None,
    }
}

// ===========================================================================
// Single property
// ===========================================================================

#[test]
fn test_rental_known_answer() {
    let config = FinanceConfig::default();
    let m = investment::evaluate_property(
        &config,
        dec!(300000),
        dec!(75000),
        dec!(5),
        dec!(2000),
        dec!(400),
        config.default_term_years,
    );
    let pmt = amortization::monthly_payment(dec!(225000), dec!(5), 30);
    // 225k at 5% over 30 years is ~1207.85
    assert!((pmt - dec!(1207.85)).abs() < dec!(0.01));

    let invested = dec!(75000) + dec!(300000) * config.closing_cost_rate;
    let expected = PropertyMetrics {
        loan_amount: dec!(225000),
        monthly_payment: pmt,
        monthly_cash_flow: dec!(2000) - dec!(400) - pmt,
        annual_cash_flow: (dec!(2000) - dec!(400) - pmt) * dec!(12),
        total_investment: invested,
        cash_on_cash_pct: (dec!(2000) - dec!(400) - pmt) * dec!(12) / invested * dec!(100),
        cap_rate_pct: dec!(6.4),
    };
    assert_eq!(m, expected);
}

#[test]
fn test_cash_on_cash_zero_without_investment() {
    let config = FinanceConfig {
        closing_cost_rate: Decimal::ZERO,
        ..FinanceConfig::default()
    };
    let m = investment::evaluate_property(
        &config,
        dec!(200000),
        Decimal::ZERO,
        dec!(4),
        dec!(1800),
        dec!(300),
        30,
    );
    assert_eq!(m.total_investment, Decimal::ZERO);
    assert_eq!(m.cash_on_cash_pct, Decimal::ZERO);
}

#[test]
fn test_zero_price_cap_rate() {
    let config = FinanceConfig::default();
    let out = investment::analyze_rental(
        &config,
        &property(dec!(0), dec!(0), dec!(5), dec!(1000), dec!(100)),
    )
    .unwrap();
    assert_eq!(out.result.cap_rate_pct, Decimal::ZERO);
    assert!(out.warnings.iter().any(|w| w.contains("cap rate reported as 0")));
}

// ===========================================================================
// Comparison
// ===========================================================================

#[test]
fn test_compare_default_pair() {
    let config = FinanceConfig::default();
    let input = ComparisonInput {
        first: property(dec!(300000), dec!(60000), dec!(4.5), dec!(2000), dec!(500)),
        second: property(dec!(250000), dec!(50000), dec!(4.5), dec!(1800), dec!(450)),
    };
    let out = investment::analyze_comparison(&config, &input).unwrap();
    let r = &out.result;
    assert_eq!(
        investment::compare_properties(&r.first, &r.second),
        r.winner
    );
    assert_eq!(
        r.cash_on_cash_spread_pct,
        r.first.cash_on_cash_pct - r.second.cash_on_cash_pct
    );
    // Second property carries less debt per rent dollar
    assert_eq!(r.winner, Winner::Second);
}

#[test]
fn test_identical_properties_tie_to_second() {
    let config = FinanceConfig::default();
    let p = property(dec!(300000), dec!(75000), dec!(5), dec!(2000), dec!(400));
    let a = investment::evaluate_input(&config, &p);
    let b = investment::evaluate_input(&config, &p);
    assert_eq!(investment::compare_properties(&a, &b), Winner::Second);
}
