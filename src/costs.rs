use serde::{Deserialize, Serialize};

use crate::config::CostConfig;
use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::levy::{legal_fees, loan_stamp_duty, transfer_stamp_duty, LegalFeeResult, LevyResult};

/// everything payable at purchase time, before the first installment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpfrontCostSummary {
    pub property_price: Money,
    pub loan_amount: Money,
    pub down_payment: Money,
    pub transfer_duty: LevyResult,
    pub loan_duty: LevyResult,
    pub legal_fees_purchase: LegalFeeResult,
    pub legal_fees_loan: LegalFeeResult,
    pub valuation_fee: Money,
    /// all costs excluding the down payment
    pub total_costs: Money,
    /// total cash needed including the down payment
    pub total_with_down_payment: Money,
}

impl UpfrontCostSummary {
    /// flattened (label, amount) view for generic display code
    pub fn summary_lines(&self) -> Vec<(String, Money)> {
        vec![
            ("Down payment".to_string(), self.down_payment),
            ("Stamp duty (MOT)".to_string(), self.transfer_duty.net_amount),
            (
                "Stamp duty (loan agreement)".to_string(),
                self.loan_duty.net_amount,
            ),
            (
                "Legal fees (purchase)".to_string(),
                self.legal_fees_purchase.total,
            ),
            ("Legal fees (loan)".to_string(), self.legal_fees_loan.total),
            ("Valuation fee".to_string(), self.valuation_fee),
        ]
    }
}

/// aggregate the statutory and professional costs of a purchase
pub fn upfront_costs(
    property_price: Money,
    loan_amount: Money,
    first_time_buyer: bool,
    apply_campaign_exemption: bool,
    config: &CostConfig,
) -> Result<UpfrontCostSummary> {
    if property_price.is_negative() {
        return Err(CalcError::invalid_parameter("property price must not be negative"));
    }
    if loan_amount.is_negative() {
        return Err(CalcError::invalid_parameter("loan amount must not be negative"));
    }
    if loan_amount > property_price {
        return Err(CalcError::invalid_parameter(
            "loan amount must not exceed property price",
        ));
    }

    let down_payment = (property_price - loan_amount).round_cents();

    let transfer_duty = transfer_stamp_duty(
        property_price,
        first_time_buyer,
        apply_campaign_exemption,
        config,
    )?;
    let loan_duty = loan_stamp_duty(loan_amount, property_price, first_time_buyer, config)?;
    let legal_fees_purchase = legal_fees(property_price, config)?;
    let legal_fees_loan = legal_fees(loan_amount, config)?;
    let valuation_fee = config.valuation_fee.amount_for(property_price);

    let total_costs = (transfer_duty.net_amount
        + loan_duty.net_amount
        + legal_fees_purchase.total
        + legal_fees_loan.total
        + valuation_fee)
        .round_cents();

    Ok(UpfrontCostSummary {
        property_price,
        loan_amount,
        down_payment,
        transfer_duty,
        loan_duty,
        legal_fees_purchase,
        legal_fees_loan,
        valuation_fee,
        total_costs,
        total_with_down_payment: (total_costs + down_payment).round_cents(),
    })
}
