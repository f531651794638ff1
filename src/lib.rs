pub mod affordability;
pub mod config;
pub mod costs;
pub mod decimal;
pub mod errors;
pub mod islamic;
pub mod levy;
pub mod payments;
pub mod refinance;
pub mod types;

// re-export key types
pub use decimal::{format_rm, Money, Rate};
pub use errors::{CalcError, Result};
pub use types::LoanTerms;
pub use payments::{
    monthly_payment, simulate_extra_payments, solve_max_principal, AmortizationIter,
    AmortizationRow, AmortizationSchedule, ExtraPaymentResult, PaymentSummary,
};
pub use affordability::{assess_affordability, AffordabilityResult};
pub use config::{AffordabilityConfig, CostConfig};
pub use costs::{upfront_costs, UpfrontCostSummary};
pub use islamic::{murabahah, musharakah_mutanaqisah, FinancingQuote};
pub use levy::{
    compute_tiered_levy, legal_fees, loan_stamp_duty, transfer_stamp_duty, LevyResult, LevyTier,
    TierTable,
};
pub use refinance::{compare_refinancing, BreakEven, RefinanceComparison};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
