use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::levy::{LevyTier, TierTable};

/// exemption policy for the property-transfer (MOT) stamp duty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferDutyExemption {
    /// first-time buyers pay nothing when the price is at or below this
    pub first_time_buyer_price_ceiling: Money,
    /// fraction of the gross duty waived under the ownership campaign
    pub campaign_fraction: Decimal,
    /// campaign applies to prices above the band start, up to and
    /// including the band end
    pub campaign_band_start: Money,
    pub campaign_band_end: Money,
}

/// exemption policy for the loan-agreement stamp duty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDutyExemption {
    /// eligibility is gated on the property price, not the loan amount
    pub property_price_ceiling: Money,
    /// only this much of the loan is exempt, not the whole loan
    pub exempt_base_cap: Money,
}

/// valuation fee: percentage of price with a fixed floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationFee {
    pub minimum: Money,
    pub rate: Rate,
}

impl ValuationFee {
    pub fn amount_for(&self, property_price: Money) -> Money {
        (property_price * self.rate.as_decimal())
            .max(self.minimum)
            .round_cents()
    }
}

/// statutory reference data for upfront transaction costs
///
/// The engine validates the shape of these tables, not their provenance;
/// callers may supply their own in place of the Malaysian presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    pub transfer_duty_tiers: TierTable,
    pub loan_duty_tiers: TierTable,
    pub legal_fee_tiers: TierTable,
    pub transfer_duty_exemption: TransferDutyExemption,
    pub loan_duty_exemption: LoanDutyExemption,
    /// fixed disbursement-style fees added on top of the tiered legal fee
    pub legal_disbursements: BTreeMap<String, Money>,
    pub valuation_fee: ValuationFee,
}

impl CostConfig {
    /// Malaysian statutory scales: MOT duty, loan-agreement duty at 0.5%,
    /// and the solicitors' remuneration scale
    pub fn malaysia() -> Result<Self> {
        let transfer_duty_tiers = TierTable::new(vec![
            LevyTier::new(
                Money::ZERO,
                Some(Money::from_major(100_000)),
                Rate::from_percentage(dec!(1)),
            ),
            LevyTier::new(
                Money::from_major(100_000),
                Some(Money::from_major(500_000)),
                Rate::from_percentage(dec!(2)),
            ),
            LevyTier::new(
                Money::from_major(500_000),
                Some(Money::from_major(1_000_000)),
                Rate::from_percentage(dec!(3)),
            ),
            LevyTier::new(
                Money::from_major(1_000_000),
                None,
                Rate::from_percentage(dec!(4)),
            ),
        ])?;

        let loan_duty_tiers = TierTable::new(vec![LevyTier::new(
            Money::ZERO,
            None,
            Rate::from_percentage(dec!(0.5)),
        )])?;

        let legal_fee_tiers = TierTable::new(vec![
            LevyTier::new(
                Money::ZERO,
                Some(Money::from_major(500_000)),
                Rate::from_percentage(dec!(1.0)),
            ),
            LevyTier::new(
                Money::from_major(500_000),
                Some(Money::from_major(1_000_000)),
                Rate::from_percentage(dec!(0.8)),
            ),
            LevyTier::new(
                Money::from_major(1_000_000),
                Some(Money::from_major(3_000_000)),
                Rate::from_percentage(dec!(0.7)),
            ),
            LevyTier::new(
                Money::from_major(3_000_000),
                Some(Money::from_major(5_000_000)),
                Rate::from_percentage(dec!(0.6)),
            ),
            LevyTier::new(
                Money::from_major(5_000_000),
                None,
                Rate::from_percentage(dec!(0.5)),
            ),
        ])?;

        let mut legal_disbursements = BTreeMap::new();
        legal_disbursements.insert("Land search".to_string(), Money::from_major(60));
        legal_disbursements.insert("Bankruptcy search".to_string(), Money::from_major(50));
        legal_disbursements.insert("Registration fee".to_string(), Money::from_major(100));
        legal_disbursements.insert("Stamping of documents".to_string(), Money::from_major(40));

        Ok(Self {
            transfer_duty_tiers,
            loan_duty_tiers,
            legal_fee_tiers,
            transfer_duty_exemption: TransferDutyExemption {
                first_time_buyer_price_ceiling: Money::from_major(500_000),
                campaign_fraction: dec!(0.75),
                campaign_band_start: Money::from_major(500_000),
                campaign_band_end: Money::from_major(1_000_000),
            },
            loan_duty_exemption: LoanDutyExemption {
                property_price_ceiling: Money::from_major(500_000),
                exempt_base_cap: Money::from_major(500_000),
            },
            legal_disbursements,
            valuation_fee: ValuationFee {
                minimum: Money::from_major(500),
                rate: Rate::from_percentage(dec!(0.25)),
            },
        })
    }
}

/// debt-service-ratio limits for affordability assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityConfig {
    /// DSR ceiling as a fraction of gross monthly income
    pub max_dsr: Rate,
    /// assumed down payment used to estimate a property price from the
    /// maximum loan
    pub down_payment_rate: Rate,
}

impl AffordabilityConfig {
    /// common Malaysian bank practice: 70% DSR, 10% down payment
    pub fn malaysia() -> Self {
        Self {
            max_dsr: Rate::from_percentage(dec!(70)),
            down_payment_rate: Rate::from_percentage(dec!(10)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malaysia_config_builds() {
        let config = CostConfig::malaysia().unwrap();

        assert_eq!(config.transfer_duty_tiers.tiers().len(), 4);
        assert_eq!(config.loan_duty_tiers.tiers().len(), 1);
        assert_eq!(config.legal_fee_tiers.tiers().len(), 5);
        assert_eq!(config.legal_disbursements.len(), 4);
    }

    #[test]
    fn test_valuation_fee_floor() {
        let config = CostConfig::malaysia().unwrap();

        // 0.25% of 100k = 250, below the RM 500 floor
        assert_eq!(
            config.valuation_fee.amount_for(Money::from_major(100_000)),
            Money::from_major(500)
        );
        // 0.25% of 600k = 1,500
        assert_eq!(
            config.valuation_fee.amount_for(Money::from_major(600_000)),
            Money::from_major(1_500)
        );
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = CostConfig::malaysia().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: CostConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
