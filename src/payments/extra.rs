use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::types::LoanTerms;

use super::annuity::{monthly_payment, raw_monthly_payment, PaymentSummary};

/// totals for the accelerated payoff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceleratedSummary {
    pub monthly_payment: Money,
    pub total_months: u32,
    pub total_years: Decimal,
    pub total_interest: Money,
    pub total_payment: Money,
}

/// savings relative to the unmodified loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentSavings {
    pub months_saved: u32,
    pub years_saved: Decimal,
    pub interest_saved: Money,
    pub total_saved: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentResult {
    pub original: PaymentSummary,
    pub with_extra_payments: AcceleratedSummary,
    pub savings: ExtraPaymentSavings,
}

/// simulate the loan month by month with an extra monthly payment and an
/// optional one-off lump sum
///
/// The lump sum is applied at the start of its month, before that month's
/// interest accrues; a lump sum scheduled after the balance already closes
/// never applies and is not collected. The final payment is truncated to
/// close the balance exactly, with interest still charged on the
/// pre-payment balance.
pub fn simulate_extra_payments(
    terms: &LoanTerms,
    extra_monthly: Money,
    lump_sum: Money,
    lump_sum_month: u32,
) -> Result<ExtraPaymentResult> {
    if extra_monthly.is_negative() {
        return Err(CalcError::invalid_parameter("extra payment must not be negative"));
    }
    if lump_sum.is_negative() {
        return Err(CalcError::invalid_parameter("lump sum must not be negative"));
    }
    if lump_sum.is_positive() && lump_sum_month == 0 {
        return Err(CalcError::invalid_parameter("lump sum month must be at least 1"));
    }

    let baseline = monthly_payment(terms)?;
    let rate = terms.monthly_rate();
    let payment = raw_monthly_payment(terms.principal(), terms.annual_rate(), terms.total_months());
    let payment_with_extra = payment + extra_monthly;

    let first_month_interest = terms.principal() * rate;
    if terms.principal().is_positive() && payment_with_extra <= first_month_interest {
        return Err(CalcError::NonAmortizing {
            payment: payment_with_extra.round_cents(),
            first_month_interest: first_month_interest.round_cents(),
        });
    }

    let mut balance = terms.principal();
    let mut month = 0_u32;
    let mut total_interest = Money::ZERO;
    let mut total_paid = Money::ZERO;

    while balance.is_positive() {
        month += 1;

        if month == lump_sum_month && lump_sum.is_positive() {
            let applied = lump_sum.min(balance);
            balance -= applied;
            total_paid += applied;
        }

        let interest = balance * rate;
        total_interest += interest;

        let reduction = payment_with_extra - interest;
        // half a cent of slack absorbs decimal residue in the last period
        if reduction + Money::from_decimal(dec!(0.005)) >= balance {
            total_paid += balance + interest;
            balance = Money::ZERO;
        } else {
            balance -= reduction;
            total_paid += payment_with_extra;
        }
    }

    let months_saved = terms.total_months().saturating_sub(month);

    Ok(ExtraPaymentResult {
        original: baseline,
        with_extra_payments: AcceleratedSummary {
            monthly_payment: payment_with_extra.round_cents(),
            total_months: month,
            total_years: years(month),
            total_interest: total_interest.round_cents(),
            total_payment: total_paid.round_cents(),
        },
        savings: ExtraPaymentSavings {
            months_saved,
            years_saved: years(months_saved),
            interest_saved: (baseline.total_interest - total_interest)
                .max(Money::ZERO)
                .round_cents(),
            total_saved: (baseline.total_payment - total_paid)
                .max(Money::ZERO)
                .round_cents(),
        },
    })
}

fn years(months: u32) -> Decimal {
    (Decimal::from(months) / dec!(12)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    fn terms(principal: i64, rate: Decimal, years: u32) -> LoanTerms {
        LoanTerms::new(Money::from_major(principal), Rate::from_percentage(rate), years).unwrap()
    }

    #[test]
    fn test_extra_monthly_shortens_loan() {
        // RM 300k at 4.0% over 20 years with RM 500 extra per month
        let result = simulate_extra_payments(
            &terms(300_000, dec!(4.0), 20),
            Money::from_major(500),
            Money::ZERO,
            0,
        )
        .unwrap();

        assert!(result.with_extra_payments.total_months < 240);
        assert!(result.savings.interest_saved.is_positive());
        assert_eq!(
            result.savings.months_saved,
            240 - result.with_extra_payments.total_months
        );
    }

    #[test]
    fn test_no_extra_matches_baseline() {
        let result = simulate_extra_payments(
            &terms(300_000, dec!(4.0), 20),
            Money::ZERO,
            Money::ZERO,
            0,
        )
        .unwrap();

        assert_eq!(result.with_extra_payments.total_months, 240);
        assert_eq!(result.savings.months_saved, 0);

        let diff = (result.with_extra_payments.total_interest - result.original.total_interest).abs();
        assert!(diff < Money::from_major(2));
    }

    #[test]
    fn test_lump_sum_reduces_interest() {
        let base = simulate_extra_payments(
            &terms(300_000, dec!(4.0), 20),
            Money::ZERO,
            Money::ZERO,
            0,
        )
        .unwrap();

        let with_lump = simulate_extra_payments(
            &terms(300_000, dec!(4.0), 20),
            Money::ZERO,
            Money::from_major(50_000),
            12,
        )
        .unwrap();

        assert!(with_lump.with_extra_payments.total_months < base.with_extra_payments.total_months);
        assert!(
            with_lump.with_extra_payments.total_interest < base.with_extra_payments.total_interest
        );
    }

    #[test]
    fn test_lump_sum_larger_than_balance_closes_loan() {
        let result = simulate_extra_payments(
            &terms(100_000, dec!(4.0), 10),
            Money::ZERO,
            Money::from_major(200_000),
            1,
        )
        .unwrap();

        assert_eq!(result.with_extra_payments.total_months, 1);
        // only the outstanding balance is collected, never the full lump sum
        assert!(result.with_extra_payments.total_payment <= Money::from_major(100_001));
    }

    #[test]
    fn test_lump_sum_after_payoff_is_ignored() {
        let without_lump = simulate_extra_payments(
            &terms(100_000, dec!(4.0), 10),
            Money::from_major(2_000),
            Money::ZERO,
            0,
        )
        .unwrap();

        // heavy extra payments close the loan long before month 119
        let with_late_lump = simulate_extra_payments(
            &terms(100_000, dec!(4.0), 10),
            Money::from_major(2_000),
            Money::from_major(50_000),
            119,
        )
        .unwrap();

        assert!(without_lump.with_extra_payments.total_months < 119);
        assert_eq!(with_late_lump, without_lump);
    }

    #[test]
    fn test_final_payment_truncated() {
        let result = simulate_extra_payments(
            &terms(10_000, dec!(6.0), 1),
            Money::from_major(5_000),
            Money::ZERO,
            0,
        )
        .unwrap();

        // total paid must equal principal plus interest charged, not overshoot
        let expected = Money::from_major(10_000) + result.with_extra_payments.total_interest;
        let diff = (result.with_extra_payments.total_payment - expected).abs();
        assert!(diff < Money::from_decimal(dec!(0.02)));
    }

    #[test]
    fn test_negative_extra_rejected() {
        let result = simulate_extra_payments(
            &terms(100_000, dec!(4.0), 10),
            Money::from_major(-1),
            Money::ZERO,
            0,
        );
        assert!(matches!(result, Err(CalcError::InvalidParameter { .. })));
    }

    #[test]
    fn test_lump_sum_without_month_rejected() {
        let result = simulate_extra_payments(
            &terms(100_000, dec!(4.0), 10),
            Money::ZERO,
            Money::from_major(10_000),
            0,
        );
        assert!(result.is_err());
    }
}
