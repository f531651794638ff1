use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::AffordabilityConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::payments::annuity::solve_max_principal;

/// inputs echoed back alongside the derived ceiling figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityBreakdown {
    pub monthly_income: Money,
    pub existing_commitments: Money,
    /// income times the DSR ceiling, before existing commitments
    pub dsr_ceiling_payment: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub can_afford: bool,
    pub max_loan_amount: Money,
    pub max_monthly_payment: Money,
    pub current_dsr_percent: Decimal,
    pub max_dsr_percent: Decimal,
    pub available_dsr_percent: Decimal,
    /// maximum loan grossed up by the assumed down payment
    pub estimated_property_price: Money,
    pub breakdown: AffordabilityBreakdown,
}

/// how much home loan the income can service under the DSR ceiling
pub fn assess_affordability(
    monthly_income: Money,
    existing_commitments: Money,
    annual_rate: Rate,
    tenure_years: u32,
    config: &AffordabilityConfig,
) -> Result<AffordabilityResult> {
    if !monthly_income.is_positive() {
        return Err(CalcError::invalid_parameter("monthly income must be positive"));
    }
    if existing_commitments.is_negative() {
        return Err(CalcError::invalid_parameter("commitments must not be negative"));
    }

    let dsr_ceiling_payment = monthly_income * config.max_dsr.as_decimal();
    let max_monthly_payment = (dsr_ceiling_payment - existing_commitments).max(Money::ZERO);
    let can_afford = max_monthly_payment.is_positive();

    let max_loan_amount = if can_afford {
        solve_max_principal(max_monthly_payment, annual_rate, tenure_years)?
    } else {
        Money::ZERO
    };

    let current_dsr_percent = round_percent(
        existing_commitments.as_decimal() / monthly_income.as_decimal() * dec!(100),
    );
    let max_dsr_percent = config.max_dsr.as_percentage();
    let available_dsr_percent = (max_dsr_percent - current_dsr_percent).max(Decimal::ZERO);

    let financed_fraction = Decimal::ONE - config.down_payment_rate.as_decimal();
    let estimated_property_price = if can_afford && !financed_fraction.is_zero() {
        (max_loan_amount / financed_fraction).round_cents()
    } else {
        Money::ZERO
    };

    Ok(AffordabilityResult {
        can_afford,
        max_loan_amount,
        max_monthly_payment: max_monthly_payment.round_cents(),
        current_dsr_percent,
        max_dsr_percent,
        available_dsr_percent,
        estimated_property_price,
        breakdown: AffordabilityBreakdown {
            monthly_income,
            existing_commitments,
            dsr_ceiling_payment: dsr_ceiling_payment.round_cents(),
        },
    })
}

fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
