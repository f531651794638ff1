use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};

/// validated home loan terms
///
/// Deserialization goes through the same validation as `new`, so an
/// invalid record cannot reach the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLoanTerms")]
pub struct LoanTerms {
    principal: Money,
    annual_rate: Rate,
    tenure_years: u32,
}

#[derive(Deserialize)]
struct RawLoanTerms {
    principal: Money,
    annual_rate: Rate,
    tenure_years: u32,
}

impl TryFrom<RawLoanTerms> for LoanTerms {
    type Error = CalcError;

    fn try_from(raw: RawLoanTerms) -> Result<Self> {
        LoanTerms::new(raw.principal, raw.annual_rate, raw.tenure_years)
    }
}

impl LoanTerms {
    /// create validated terms; rejects zero tenure, negative principal or rate
    pub fn new(principal: Money, annual_rate: Rate, tenure_years: u32) -> Result<Self> {
        if tenure_years == 0 {
            return Err(CalcError::invalid_parameter("tenure must be at least one year"));
        }
        if principal.is_negative() {
            return Err(CalcError::invalid_parameter("principal must not be negative"));
        }
        if annual_rate.is_negative() {
            return Err(CalcError::invalid_parameter("interest rate must not be negative"));
        }

        Ok(Self {
            principal,
            annual_rate,
            tenure_years,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn tenure_years(&self) -> u32 {
        self.tenure_years
    }

    /// periodic monthly rate as a decimal fraction
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate.monthly()
    }

    pub fn total_months(&self) -> u32 {
        self.tenure_years * 12
    }
}
