use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::payments::annuity::{monthly_payment, PaymentSummary};
use crate::types::LoanTerms;

/// cost-plus sale: profit fixed at contract signing, flat installments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MurabahahQuote {
    pub financing_amount: Money,
    /// simple (non-compounding) markup over the full tenure
    pub total_profit: Money,
    pub selling_price: Money,
    pub monthly_payment: Money,
    pub total_months: u32,
}

/// fixed-markup financing; there is no amortization schedule because every
/// installment is an equal share of the agreed selling price
pub fn murabahah(
    financing_amount: Money,
    profit_rate: Rate,
    tenure_years: u32,
) -> Result<MurabahahQuote> {
    // same validation surface as a conventional loan
    let terms = LoanTerms::new(financing_amount, profit_rate, tenure_years)?;
    let total_months = terms.total_months();

    let total_profit =
        financing_amount * profit_rate.as_decimal() * Decimal::from(tenure_years);
    let selling_price = financing_amount + total_profit;

    Ok(MurabahahQuote {
        financing_amount,
        total_profit: total_profit.round_cents(),
        selling_price: selling_price.round_cents(),
        monthly_payment: (selling_price / Decimal::from(total_months)).round_cents(),
        total_months,
    })
}

/// diminishing partnership: the bank's share is bought out over the tenure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MusharakahQuote {
    pub property_value: Money,
    pub customer_contribution: Money,
    /// financed portion, amortized like a conventional principal
    pub bank_share: Money,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_rental: Money,
}

/// diminishing-partnership financing; the buyout installments follow the
/// annuity formula applied to the bank's share
pub fn musharakah_mutanaqisah(
    property_value: Money,
    customer_contribution: Money,
    rental_rate: Rate,
    tenure_years: u32,
) -> Result<MusharakahQuote> {
    if customer_contribution.is_negative() {
        return Err(CalcError::invalid_parameter("contribution must not be negative"));
    }
    if customer_contribution > property_value {
        return Err(CalcError::invalid_parameter(
            "contribution must not exceed property value",
        ));
    }

    let bank_share = property_value - customer_contribution;
    let terms = LoanTerms::new(bank_share, rental_rate, tenure_years)?;
    let summary = monthly_payment(&terms)?;

    Ok(MusharakahQuote {
        property_value,
        customer_contribution,
        bank_share,
        monthly_payment: summary.monthly_payment,
        total_payment: summary.total_payment,
        total_rental: (summary.total_payment - bank_share).max(Money::ZERO).round_cents(),
    })
}

/// a financing quote under any of the supported models
///
/// Each variant keeps its own result shape; generic display code can use
/// `total_cost_of_financing` without matching on the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FinancingQuote {
    Conventional(PaymentSummary),
    Murabahah(MurabahahQuote),
    MusharakahMutanaqisah(MusharakahQuote),
}

impl FinancingQuote {
    /// interest, profit, or rental, depending on the model
    pub fn total_cost_of_financing(&self) -> Money {
        match self {
            FinancingQuote::Conventional(summary) => summary.total_interest,
            FinancingQuote::Murabahah(quote) => quote.total_profit,
            FinancingQuote::MusharakahMutanaqisah(quote) => quote.total_rental,
        }
    }

    pub fn monthly_payment(&self) -> Money {
        match self {
            FinancingQuote::Conventional(summary) => summary.monthly_payment,
            FinancingQuote::Murabahah(quote) => quote.monthly_payment,
            FinancingQuote::MusharakahMutanaqisah(quote) => quote.monthly_payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_murabahah_simple_markup() {
        // 300k at 4% for 20 years: profit = 300k * 0.04 * 20
        let quote = murabahah(
            Money::from_major(300_000),
            Rate::from_percentage(dec!(4.0)),
            20,
        )
        .unwrap();

        assert_eq!(quote.total_profit, Money::from_major(240_000));
        assert_eq!(quote.selling_price, Money::from_major(540_000));
        assert_eq!(quote.monthly_payment, Money::from_major(2_250));
        assert_eq!(quote.total_months, 240);
    }

    #[test]
    fn test_murabahah_flat_payment_covers_selling_price() {
        let quote = murabahah(
            Money::from_major(250_000),
            Rate::from_percentage(dec!(3.5)),
            25,
        )
        .unwrap();

        let paid = quote.monthly_payment * Decimal::from(quote.total_months);
        let diff = (paid - quote.selling_price).abs();
        // only the per-installment cent rounding can drift
        assert!(diff < Money::from_major(2));
    }

    #[test]
    fn test_musharakah_uses_annuity_on_bank_share() {
        let quote = musharakah_mutanaqisah(
            Money::from_major(500_000),
            Money::from_major(100_000),
            Rate::from_percentage(dec!(4.1)),
            30,
        )
        .unwrap();

        assert_eq!(quote.bank_share, Money::from_major(400_000));

        let conventional = monthly_payment(
            &LoanTerms::new(
                Money::from_major(400_000),
                Rate::from_percentage(dec!(4.1)),
                30,
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(quote.monthly_payment, conventional.monthly_payment);
        assert_eq!(quote.total_rental, conventional.total_interest);
    }

    #[test]
    fn test_musharakah_contribution_above_value_rejected() {
        let result = musharakah_mutanaqisah(
            Money::from_major(300_000),
            Money::from_major(400_000),
            Rate::from_percentage(dec!(4.0)),
            20,
        );
        assert!(matches!(result, Err(CalcError::InvalidParameter { .. })));
    }

    #[test]
    fn test_quote_accessor_per_variant() {
        let murabahah_quote = murabahah(
            Money::from_major(300_000),
            Rate::from_percentage(dec!(4.0)),
            20,
        )
        .unwrap();
        assert_eq!(
            FinancingQuote::Murabahah(murabahah_quote).total_cost_of_financing(),
            Money::from_major(240_000)
        );

        let musharakah_quote = musharakah_mutanaqisah(
            Money::from_major(500_000),
            Money::from_major(100_000),
            Rate::from_percentage(dec!(4.1)),
            30,
        )
        .unwrap();
        assert_eq!(
            FinancingQuote::MusharakahMutanaqisah(musharakah_quote).total_cost_of_financing(),
            musharakah_quote.total_rental
        );

        let terms = LoanTerms::new(
            Money::from_major(500_000),
            Rate::from_percentage(dec!(4.1)),
            30,
        )
        .unwrap();
        let summary = monthly_payment(&terms).unwrap();
        assert_eq!(
            FinancingQuote::Conventional(summary).total_cost_of_financing(),
            summary.total_interest
        );
    }
}
