use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        message: String,
    },

    #[error("payment does not amortize: payment {payment}, first month interest {first_month_interest}")]
    NonAmortizing {
        payment: Money,
        first_month_interest: Money,
    },

    #[error("invalid tier table: {message}")]
    InvalidTierTable {
        message: String,
    },
}

impl CalcError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        CalcError::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn invalid_tier_table(message: impl Into<String>) -> Self {
        CalcError::InvalidTierTable {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
