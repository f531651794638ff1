use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::CostConfig;
use crate::decimal::Money;
use crate::errors::Result;

use super::{compute_tiered_levy, LevyResult};

/// solicitors' fee for a conveyancing or loan document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalFeeResult {
    /// scale fee computed on the document value
    pub professional_fee: LevyResult,
    /// fixed disbursements added on top, by name
    pub disbursements: BTreeMap<String, Money>,
    pub disbursements_total: Money,
    pub total: Money,
}

/// tiered professional fee plus the configured fixed disbursements;
/// no exemptions apply to legal fees
pub fn legal_fees(document_value: Money, config: &CostConfig) -> Result<LegalFeeResult> {
    let professional_fee = compute_tiered_levy(document_value, &config.legal_fee_tiers)?;

    let disbursements = config.legal_disbursements.clone();
    let disbursements_total = disbursements
        .values()
        .fold(Money::ZERO, |acc, &x| acc + x)
        .round_cents();

    let total = (professional_fee.net_amount + disbursements_total).round_cents();

    Ok(LegalFeeResult {
        professional_fee,
        disbursements,
        disbursements_total,
        total,
    })
}
