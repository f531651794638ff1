use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanTerms;

use super::annuity::raw_monthly_payment;

/// one month of an amortization schedule; every monetary field is rounded
/// to cents, the generator keeps full precision internally
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub year: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// lazy month-by-month schedule generator
///
/// Finite (exactly `total_months` rows) and restartable: the iterator is
/// `Clone`, and building a fresh one from the same terms replays the same rows.
#[derive(Debug, Clone)]
pub struct AmortizationIter {
    monthly_rate: Decimal,
    payment: Money,
    balance: Money,
    cumulative_interest: Money,
    cumulative_principal: Money,
    month: u32,
    total_months: u32,
}

impl AmortizationIter {
    pub fn new(terms: &LoanTerms) -> Self {
        let payment = raw_monthly_payment(
            terms.principal(),
            terms.annual_rate(),
            terms.total_months(),
        );

        Self {
            monthly_rate: terms.monthly_rate(),
            payment,
            balance: terms.principal(),
            cumulative_interest: Money::ZERO,
            cumulative_principal: Money::ZERO,
            month: 0,
            total_months: terms.total_months(),
        }
    }
}

impl Iterator for AmortizationIter {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<AmortizationRow> {
        if self.month >= self.total_months {
            return None;
        }
        self.month += 1;

        let interest = self.balance * self.monthly_rate;
        // clamp the final principal portion so the balance lands on zero
        // instead of drifting slightly negative
        let principal = (self.payment - interest).min(self.balance).max(Money::ZERO);

        self.balance -= principal;
        self.cumulative_interest += interest;
        self.cumulative_principal += principal;

        Some(AmortizationRow {
            month: self.month,
            year: (self.month + 11) / 12,
            payment: (interest + principal).round_cents(),
            principal: principal.round_cents(),
            interest: interest.round_cents(),
            balance: self.balance.round_cents(),
            cumulative_interest: self.cumulative_interest.round_cents(),
            cumulative_principal: self.cumulative_principal.round_cents(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_months - self.month) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AmortizationIter {}

/// fully materialized amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub rows: Vec<AmortizationRow>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate the full schedule for the given terms
    pub fn generate(terms: &LoanTerms) -> Result<Self> {
        let rows: Vec<AmortizationRow> = AmortizationIter::new(terms).collect();

        let total_interest = rows
            .iter()
            .map(|r| r.interest)
            .fold(Money::ZERO, |acc, x| acc + x)
            .round_cents();

        let total_payment = rows
            .iter()
            .map(|r| r.payment)
            .fold(Money::ZERO, |acc, x| acc + x)
            .round_cents();

        Ok(Self {
            terms: *terms,
            rows,
            total_interest,
            total_payment,
        })
    }

    /// get row for a specific month (1-based)
    pub fn row(&self, month: u32) -> Option<&AmortizationRow> {
        self.rows.get(month.checked_sub(1)? as usize)
    }

    /// remaining balance after the given number of payments; month 0 is
    /// the starting principal, months past the end of the term are settled
    pub fn balance_after(&self, month: u32) -> Money {
        if month == 0 {
            return self.terms.principal();
        }
        self.row(month).map(|r| r.balance).unwrap_or(Money::ZERO)
    }

    /// serialize the schedule as CSV, one line per row
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Month,Year,Payment,Principal,Interest,Balance,Cumulative Interest\n");
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{}",
                row.month,
                row.year,
                row.payment,
                row.principal,
                row.interest,
                row.balance,
                row.cumulative_interest,
            );
        }
        out
    }
}
