use crate::config::CostConfig;
use crate::decimal::Money;
use crate::errors::Result;

use super::{compute_tiered_levy, LevyResult};

/// stamp duty on the memorandum of transfer (MOT)
///
/// Exemptions: first-time buyers pay nothing when the price is within the
/// configured ceiling; otherwise the ownership-campaign waiver applies to
/// prices inside the campaign band. First-time-buyer relief takes precedence.
pub fn transfer_stamp_duty(
    property_price: Money,
    first_time_buyer: bool,
    apply_campaign_exemption: bool,
    config: &CostConfig,
) -> Result<LevyResult> {
    let mut result = compute_tiered_levy(property_price, &config.transfer_duty_tiers)?;
    let policy = &config.transfer_duty_exemption;

    if first_time_buyer && property_price <= policy.first_time_buyer_price_ceiling {
        result.exemption_amount = result.gross_amount;
        result.exemption_note = "first-time buyer: full stamp duty exemption".to_string();
    } else if apply_campaign_exemption
        && property_price > policy.campaign_band_start
        && property_price <= policy.campaign_band_end
    {
        result.exemption_amount =
            (result.gross_amount * policy.campaign_fraction).round_cents();
        result.exemption_note = format!(
            "home ownership campaign: {}% stamp duty exemption",
            (policy.campaign_fraction * rust_decimal::Decimal::from(100)).normalize()
        );
    }

    result.net_amount = (result.gross_amount - result.exemption_amount).round_cents();
    Ok(result)
}

/// stamp duty on the loan agreement
///
/// The first-time-buyer exemption covers only the first portion of the loan
/// up to the configured cap, and only when the property price is within the
/// eligibility ceiling.
pub fn loan_stamp_duty(
    loan_amount: Money,
    property_price: Money,
    first_time_buyer: bool,
    config: &CostConfig,
) -> Result<LevyResult> {
    let mut result = compute_tiered_levy(loan_amount, &config.loan_duty_tiers)?;
    let policy = &config.loan_duty_exemption;

    if first_time_buyer && property_price <= policy.property_price_ceiling {
        let exempt_base = loan_amount.min(policy.exempt_base_cap);
        let exempt = compute_tiered_levy(exempt_base, &config.loan_duty_tiers)?;
        result.exemption_amount = exempt.gross_amount;
        result.exemption_note = format!(
            "first-time buyer: loan duty exempt on the first {}",
            crate::decimal::format_rm(exempt_base)
        );
    }

    result.net_amount = (result.gross_amount - result.exemption_amount).round_cents();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CostConfig {
        CostConfig::malaysia().unwrap()
    }

    #[test]
    fn test_standard_purchase_600k() {
        let result =
            transfer_stamp_duty(Money::from_major(600_000), false, false, &config()).unwrap();

        assert_eq!(result.gross_amount, Money::from_major(12_000));
        assert_eq!(result.exemption_amount, Money::ZERO);
        assert_eq!(result.net_amount, Money::from_major(12_000));
        assert!(result.exemption_note.is_empty());
    }

    #[test]
    fn test_first_time_buyer_fully_exempt() {
        let result =
            transfer_stamp_duty(Money::from_major(450_000), true, false, &config()).unwrap();

        // gross 1,000 + 7,000 = 8,000, fully waived
        assert_eq!(result.gross_amount, Money::from_major(8_000));
        assert_eq!(result.exemption_amount, Money::from_major(8_000));
        assert_eq!(result.net_amount, Money::ZERO);
        assert!(!result.exemption_note.is_empty());
    }

    #[test]
    fn test_first_time_buyer_above_ceiling_falls_to_campaign() {
        // both flags set, price above the FTB ceiling but inside the band
        let result =
            transfer_stamp_duty(Money::from_major(600_000), true, true, &config()).unwrap();

        assert_eq!(result.gross_amount, Money::from_major(12_000));
        assert_eq!(result.exemption_amount, Money::from_major(9_000));
        assert_eq!(result.net_amount, Money::from_major(3_000));
    }

    #[test]
    fn test_first_time_buyer_takes_precedence_over_campaign() {
        let result =
            transfer_stamp_duty(Money::from_major(400_000), true, true, &config()).unwrap();

        // full exemption, not the 75% campaign one
        assert_eq!(result.net_amount, Money::ZERO);
        assert!(result.exemption_note.contains("first-time buyer"));
    }

    #[test]
    fn test_campaign_outside_band_not_applied() {
        let result =
            transfer_stamp_duty(Money::from_major(1_200_000), false, true, &config()).unwrap();

        assert_eq!(result.exemption_amount, Money::ZERO);
        assert_eq!(result.net_amount, result.gross_amount);
    }

    #[test]
    fn test_loan_duty_standard() {
        let result = loan_stamp_duty(
            Money::from_major(540_000),
            Money::from_major(600_000),
            false,
            &config(),
        )
        .unwrap();

        assert_eq!(result.gross_amount, Money::from_major(2_700));
        assert_eq!(result.net_amount, Money::from_major(2_700));
    }

    #[test]
    fn test_loan_duty_first_time_buyer_capped_base() {
        // eligible property, loan within the cap: fully exempt
        let result = loan_stamp_duty(
            Money::from_major(450_000),
            Money::from_major(500_000),
            true,
            &config(),
        )
        .unwrap();

        assert_eq!(result.gross_amount, Money::from_decimal(rust_decimal_macros::dec!(2250)));
        assert_eq!(result.exemption_amount, result.gross_amount);
        assert_eq!(result.net_amount, Money::ZERO);
    }

    #[test]
    fn test_loan_duty_ineligible_property_price() {
        let result = loan_stamp_duty(
            Money::from_major(450_000),
            Money::from_major(700_000),
            true,
            &config(),
        )
        .unwrap();

        assert_eq!(result.exemption_amount, Money::ZERO);
        assert_eq!(result.net_amount, result.gross_amount);
    }
}
