pub mod amortization;
pub mod annuity;
pub mod extra;

pub use amortization::{AmortizationIter, AmortizationRow, AmortizationSchedule};
pub use annuity::{monthly_payment, solve_max_principal, PaymentSummary};
pub use extra::{
    simulate_extra_payments, AcceleratedSummary, ExtraPaymentResult, ExtraPaymentSavings,
};
