use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::types::LoanTerms;

/// summary of a fixed-rate amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    /// total interest as a percentage of principal
    pub effective_rate_percent: Decimal,
}

/// level monthly payment for the given terms
///
/// PMT = P * r * (1 + r)^n / ((1 + r)^n - 1), with the zero-rate case
/// degenerating to straight principal division. All outputs rounded to cents.
pub fn monthly_payment(terms: &LoanTerms) -> Result<PaymentSummary> {
    let n = terms.total_months();
    let payment = raw_monthly_payment(terms.principal(), terms.annual_rate(), n).round_cents();

    // totals derive from the rounded payment so that
    // total = payment * months holds exactly for callers
    let total_payment = payment * Decimal::from(n);
    let total_interest = (total_payment - terms.principal()).max(Money::ZERO);

    let effective_rate_percent = if terms.principal().is_zero() {
        Decimal::ZERO
    } else {
        (total_interest.as_decimal() / terms.principal().as_decimal() * dec!(100))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    Ok(PaymentSummary {
        monthly_payment: payment,
        total_payment: total_payment.round_cents(),
        total_interest: total_interest.round_cents(),
        effective_rate_percent,
    })
}

/// largest principal that a given monthly payment can service
///
/// Inverse of the PMT formula: P = PMT * ((1 + r)^n - 1) / (r * (1 + r)^n).
pub fn solve_max_principal(
    max_monthly_payment: Money,
    annual_rate: Rate,
    tenure_years: u32,
) -> Result<Money> {
    if tenure_years == 0 {
        return Err(CalcError::invalid_parameter("tenure must be at least one year"));
    }
    if max_monthly_payment.is_negative() {
        return Err(CalcError::invalid_parameter("payment must not be negative"));
    }
    if annual_rate.is_negative() {
        return Err(CalcError::invalid_parameter("interest rate must not be negative"));
    }

    let n = tenure_years * 12;
    let r = annual_rate.monthly();

    if r.is_zero() {
        return Ok((max_monthly_payment * Decimal::from(n)).round_cents());
    }

    let compound = pow_compound(r, n);
    let principal = max_monthly_payment.as_decimal() * (compound - Decimal::ONE) / (r * compound);

    Ok(Money::from_decimal(principal).round_cents())
}

/// unrounded level payment; shared by the schedule generator and simulator
pub(crate) fn raw_monthly_payment(principal: Money, annual_rate: Rate, months: u32) -> Money {
    let r = annual_rate.monthly();

    if r.is_zero() {
        return principal / Decimal::from(months);
    }

    let compound = pow_compound(r, months);
    let numerator = principal.as_decimal() * r * compound;
    let denominator = compound - Decimal::ONE;

    Money::from_decimal(numerator / denominator)
}

/// (1 + r)^n by repeated multiplication
pub(crate) fn pow_compound(r: Decimal, n: u32) -> Decimal {
    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..n {
        compound *= base;
    }
    compound
}
