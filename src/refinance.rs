use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::payments::annuity::{monthly_payment, PaymentSummary};
use crate::types::LoanTerms;

/// the loan being replaced, evaluated over its remaining life
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentLoan {
    pub balance: Money,
    pub annual_rate: Rate,
    pub remaining_years: u32,
}

/// the replacement offer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinanceOffer {
    pub annual_rate: Rate,
    pub tenure_years: u32,
    pub closing_costs: Money,
}

/// months until cumulative monthly savings repay the closing costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakEven {
    Months(u32),
    /// monthly payment does not decrease, so the costs are never recovered
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinanceVerdict {
    pub monthly_difference: Money,
    pub total_interest_saved: Money,
    pub break_even: BreakEven,
    pub net_savings: Money,
    pub worth_refinancing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinanceComparison {
    pub current: PaymentSummary,
    pub refinanced: PaymentSummary,
    pub comparison: RefinanceVerdict,
}

/// compare staying on the current loan against refinancing onto the offer
pub fn compare_refinancing(
    current: &CurrentLoan,
    offer: &RefinanceOffer,
) -> Result<RefinanceComparison> {
    if offer.closing_costs.is_negative() {
        return Err(CalcError::invalid_parameter("closing costs must not be negative"));
    }

    let current_terms = LoanTerms::new(current.balance, current.annual_rate, current.remaining_years)?;
    let offer_terms = LoanTerms::new(current.balance, offer.annual_rate, offer.tenure_years)?;

    let current_summary = monthly_payment(&current_terms)?;
    let refinanced_summary = monthly_payment(&offer_terms)?;

    let monthly_difference = current_summary.monthly_payment - refinanced_summary.monthly_payment;

    let break_even = if monthly_difference.is_positive() {
        let months = (offer.closing_costs.as_decimal() / monthly_difference.as_decimal()).ceil();
        BreakEven::Months(months.to_u32().unwrap_or(u32::MAX))
    } else {
        BreakEven::NotApplicable
    };

    let total_interest_saved =
        current_summary.total_interest - refinanced_summary.total_interest;
    let net_savings = total_interest_saved - offer.closing_costs;

    let worth_refinancing = net_savings.is_positive()
        && matches!(break_even, BreakEven::Months(m) if m < offer.tenure_years * 12);

    Ok(RefinanceComparison {
        current: current_summary,
        refinanced: refinanced_summary,
        comparison: RefinanceVerdict {
            monthly_difference: monthly_difference.round_cents(),
            total_interest_saved: total_interest_saved.round_cents(),
            break_even,
            net_savings: net_savings.round_cents(),
            worth_refinancing,
        },
    })
}
