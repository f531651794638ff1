pub mod legal_fees;
pub mod stamp_duty;

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};

pub use legal_fees::{legal_fees, LegalFeeResult};
pub use stamp_duty::{loan_stamp_duty, transfer_stamp_duty};

/// one band of a progressive levy scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevyTier {
    pub lower: Money,
    /// `None` marks the open-ended top band
    pub upper: Option<Money>,
    pub rate: Rate,
}

impl LevyTier {
    pub fn new(lower: Money, upper: Option<Money>, rate: Rate) -> Self {
        Self { lower, upper, rate }
    }
}

/// ordered, contiguous, exhaustive levy scale covering [0, unbounded)
///
/// Construction validates the shape so downstream walks can trust it;
/// deserialization goes through the same validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevyTier>", into = "Vec<LevyTier>")]
pub struct TierTable {
    tiers: Vec<LevyTier>,
}

impl TryFrom<Vec<LevyTier>> for TierTable {
    type Error = CalcError;

    fn try_from(tiers: Vec<LevyTier>) -> Result<Self> {
        TierTable::new(tiers)
    }
}

impl From<TierTable> for Vec<LevyTier> {
    fn from(table: TierTable) -> Vec<LevyTier> {
        table.tiers
    }
}

impl TierTable {
    pub fn new(tiers: Vec<LevyTier>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(CalcError::invalid_tier_table("table has no tiers"));
        }

        if !tiers[0].lower.is_zero() {
            return Err(CalcError::invalid_tier_table("first tier must start at 0"));
        }

        for (i, tier) in tiers.iter().enumerate() {
            if tier.rate.is_negative() {
                return Err(CalcError::invalid_tier_table(format!(
                    "tier {} has a negative rate",
                    i + 1
                )));
            }

            match tier.upper {
                Some(upper) => {
                    if upper <= tier.lower {
                        return Err(CalcError::invalid_tier_table(format!(
                            "tier {} has no width: {} to {}",
                            i + 1,
                            tier.lower,
                            upper
                        )));
                    }
                    match tiers.get(i + 1) {
                        Some(next) if next.lower != upper => {
                            return Err(CalcError::invalid_tier_table(format!(
                                "gap or overlap between {} and {}",
                                upper, next.lower
                            )));
                        }
                        Some(_) => {}
                        None => {
                            return Err(CalcError::invalid_tier_table(
                                "last tier must be unbounded",
                            ));
                        }
                    }
                }
                None => {
                    if i + 1 != tiers.len() {
                        return Err(CalcError::invalid_tier_table(
                            "only the last tier may be unbounded",
                        ));
                    }
                }
            }
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[LevyTier] {
        &self.tiers
    }
}

/// contribution of a single tier to the computed levy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBreakdown {
    /// human-readable band label, e.g. "RM 100,001 - RM 500,000"
    pub range: String,
    pub rate: Rate,
    pub taxable_amount: Money,
    pub levy_amount: Money,
}

/// outcome of a tiered levy computation, including any exemption applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevyResult {
    pub gross_amount: Money,
    pub exemption_amount: Money,
    pub exemption_note: String,
    pub net_amount: Money,
    pub breakdown: Vec<TierBreakdown>,
}

/// walk the scale bottom-up and levy each band's share of the base amount
///
/// Returns the pre-exemption result: `net_amount` equals `gross_amount` and
/// the exemption fields are zero/empty. Exemption policies layer on top.
pub fn compute_tiered_levy(base_amount: Money, table: &TierTable) -> Result<LevyResult> {
    if base_amount.is_negative() {
        return Err(CalcError::invalid_parameter("base amount must not be negative"));
    }

    let mut remaining = base_amount;
    let mut gross = Money::ZERO;
    let mut breakdown = Vec::new();

    for tier in table.tiers() {
        if remaining.is_zero() {
            break;
        }

        let taxable = match tier.upper {
            Some(upper) => remaining.min(upper - tier.lower),
            None => remaining,
        };

        let levy = taxable * tier.rate.as_decimal();
        gross += levy;
        remaining -= taxable;

        breakdown.push(TierBreakdown {
            range: range_label(tier),
            rate: tier.rate,
            taxable_amount: taxable.round_cents(),
            levy_amount: levy.round_cents(),
        });
    }

    let gross = gross.round_cents();

    Ok(LevyResult {
        gross_amount: gross,
        exemption_amount: Money::ZERO,
        exemption_note: String::new(),
        net_amount: gross,
        breakdown,
    })
}

fn range_label(tier: &LevyTier) -> String {
    match tier.upper {
        Some(upper) => {
            if tier.lower.is_zero() {
                format!("First {}", group_whole(upper))
            } else {
                format!("{} - {}", group_whole(tier.lower), group_whole(upper))
            }
        }
        None => format!("Above {}", group_whole(tier.lower)),
    }
}

/// "RM 1,000,000" style label without cents
fn group_whole(amount: Money) -> String {
    let text = amount.round_cents().as_decimal().trunc().abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in text.chars().enumerate() {
        if i > 0 && (text.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("RM {}", grouped)
}
