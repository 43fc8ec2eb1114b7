use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate, fully amortising loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount financed
    pub principal: Money,
    /// Annual interest rate as a percentage (4.5 = 4.5%)
    pub annual_rate_pct: Percent,
    /// Loan term in whole years
    pub term_years: u32,
}

/// One row of an amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 1-based payment index
    pub payment_number: u32,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// Balance after this payment, never below zero
    pub remaining_balance: Money,
}

/// Payment-by-payment schedule, ordered by `payment_number`.
pub type Schedule = Vec<PaymentRecord>;

/// Totals across a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub number_of_payments: u32,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

/// Schedule plus its summary, as returned by [`build_schedule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub summary: ScheduleSummary,
    pub schedule: Schedule,
}

// ---------------------------------------------------------------------------
// Payment math
// ---------------------------------------------------------------------------

/// Convert an annual percentage into a monthly decimal rate.
pub fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Standard fixed-rate mortgage payment: P * r(1+r)^n / ((1+r)^n - 1)
///
/// Returns zero when there is no loan to repay (`principal <= 0`) or no term.
/// An interest-free loan repays in equal straight-line instalments.
pub fn monthly_payment(principal: Money, annual_rate_pct: Percent, term_years: u32) -> Money {
    if principal <= Decimal::ZERO || term_years == 0 {
        return Decimal::ZERO;
    }

    let rate = monthly_rate(annual_rate_pct);
    let total_payments = term_years.saturating_mul(MONTHS_PER_YEAR);

    if rate.is_zero() {
        return principal / Decimal::from(total_payments);
    }

    principal.saturating_mul(annuity_factor(rate, total_payments))
}

/// Payment per unit of principal: r(1+r)^n / ((1+r)^n - 1)
///
/// `1/n` for a zero rate and zero when there are no periods. When `(1+r)^n`
/// grows past decimal range the factor has converged to `r`.
pub fn annuity_factor(monthly_rate: Rate, total_payments: u32) -> Decimal {
    if total_payments == 0 {
        return Decimal::ZERO;
    }

    if monthly_rate.is_zero() {
        return Decimal::ONE / Decimal::from(total_payments);
    }

    let compound = match compound_factor(monthly_rate, total_payments) {
        Some(c) => c,
        None => return monthly_rate,
    };

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Decimal::ONE / Decimal::from(total_payments);
    }

    monthly_rate
        .checked_mul(compound)
        .and_then(|numerator| numerator.checked_div(denominator))
        .unwrap_or(monthly_rate)
}

/// (1 + r)^n via iterative multiplication, `None` on overflow.
fn compound_factor(rate: Rate, periods: u32) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound = compound.checked_mul(base)?;
    }
    Some(compound)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Full amortisation schedule, one record per monthly payment.
///
/// Empty when the principal, rate or term is not positive. Note that a
/// zero-rate loan has a payment (see [`monthly_payment`]) but no schedule.
pub fn generate_schedule(principal: Money, annual_rate_pct: Percent, term_years: u32) -> Schedule {
    if principal <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO || term_years == 0 {
        return Vec::new();
    }

    let payment = monthly_payment(principal, annual_rate_pct, term_years);
    let rate = monthly_rate(annual_rate_pct);
    let total_payments = term_years.saturating_mul(MONTHS_PER_YEAR);

    let mut balance = principal;
    let mut schedule = Vec::with_capacity(total_payments as usize);

    for payment_number in 1..=total_payments {
        let interest_portion = balance.saturating_mul(rate);
        let principal_portion = payment - interest_portion;
        // Floor absorbs rounding drift on the final payment
        balance = balance.saturating_sub(principal_portion).max(Decimal::ZERO);

        schedule.push(PaymentRecord {
            payment_number,
            payment_amount: payment,
            principal_portion,
            interest_portion,
            remaining_balance: balance,
        });
    }

    schedule
}

pub fn summarize_schedule(schedule: &[PaymentRecord]) -> ScheduleSummary {
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for record in schedule {
        total_paid = total_paid.saturating_add(record.payment_amount);
        total_interest = total_interest.saturating_add(record.interest_portion);
        total_principal = total_principal.saturating_add(record.principal_portion);
    }

    ScheduleSummary {
        number_of_payments: schedule.len() as u32,
        monthly_payment: schedule
            .first()
            .map(|r| r.payment_amount)
            .unwrap_or(Decimal::ZERO),
        total_paid,
        total_interest,
        total_principal,
    }
}

/// Generate a schedule and its summary inside the standard output envelope.
///
/// An empty schedule is not an error; a warning names the input that
/// prevented generation.
pub fn build_schedule(input: &LoanTerms) -> ComputationOutput<ScheduleOutput> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.principal <= Decimal::ZERO {
        warnings.push("Principal is not positive — no schedule generated".into());
    }
    if input.annual_rate_pct.is_zero() {
        warnings.push(
            "Zero-rate loans repay in equal instalments — no schedule generated".into(),
        );
    } else if input.annual_rate_pct < Decimal::ZERO {
        warnings.push("Annual rate is negative — no schedule generated".into());
    } else if input.annual_rate_pct > dec!(20) {
        warnings.push(format!(
            "Annual rate {}% exceeds 20% — outside typical mortgage range",
            input.annual_rate_pct
        ));
    }
    if input.term_years == 0 {
        warnings.push("Term is zero years — no schedule generated".into());
    }

    let schedule = generate_schedule(input.principal, input.annual_rate_pct, input.term_years);
    let summary = summarize_schedule(&schedule);

    tracing::debug!(
        payments = summary.number_of_payments,
        monthly_payment = %summary.monthly_payment,
        "amortisation schedule generated"
    );

    with_metadata(
        "Fixed-rate amortisation schedule (monthly compounding)",
        input,
        warnings,
        start,
        ScheduleOutput { summary, schedule },
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
