//! Credit line: draws against a fixed limit, daily compounding interest.
//!
//! There is no repayment: `taken` and `debt` only grow.

use serde::{Deserialize, Serialize};

use shopsim_core::{DomainError, DomainResult};

use crate::AccountingEvent;

/// Maximum cumulative amount that may ever be drawn.
pub const CREDIT_LIMIT: f64 = 50_000.0;
/// Annual interest rate.
pub const CREDIT_RATE: f64 = 0.15;
/// Interest rate applied once per simulated day.
pub const DAILY_RATE: f64 = CREDIT_RATE / 365.0;

/// State of the shop's credit line.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreditLine {
    /// Cumulative amount drawn, `0 <= taken <= CREDIT_LIMIT`.
    pub taken: f64,
    /// Outstanding principal plus accrued interest.
    pub debt: f64,
}

impl CreditLine {
    /// Unused portion of the limit.
    pub fn headroom(&self) -> f64 {
        (CREDIT_LIMIT - self.taken).max(0.0)
    }

    /// Decide a credit draw.
    ///
    /// - `0` means "no request" and emits nothing.
    /// - `0 < amount <= headroom` draws the amount.
    /// - Anything else (negative, over headroom, NaN) is declined; the ledger
    ///   is left untouched.
    pub fn request(&self, day: u32, amount: f64) -> Option<AccountingEvent> {
        if amount == 0.0 {
            return None;
        }
        let headroom = self.headroom();
        if amount > 0.0 && amount <= headroom {
            Some(AccountingEvent::CreditDrawn(CreditDrawn { day, amount }))
        } else {
            Some(AccountingEvent::CreditDeclined(CreditDeclined {
                day,
                requested: amount,
                headroom,
            }))
        }
    }

    /// Interest on outstanding debt for one day, if any debt is outstanding.
    pub fn accrue(&self, day: u32) -> Option<AccountingEvent> {
        if self.debt <= 0.0 {
            return None;
        }
        let interest = self.debt * DAILY_RATE;
        Some(AccountingEvent::InterestAccrued(InterestAccrued {
            day,
            interest,
            debt_after: self.debt + interest,
        }))
    }

    /// Fold a ledger event. Cash movements are the caller's concern.
    pub fn apply(&mut self, event: &AccountingEvent) {
        match event {
            AccountingEvent::CreditDrawn(e) => {
                // Rounding in `LIMIT - taken` must not push `taken` past the limit.
                self.taken = (self.taken + e.amount).min(CREDIT_LIMIT);
                self.debt += e.amount;
            }
            AccountingEvent::InterestAccrued(e) => {
                self.debt += e.interest;
            }
            AccountingEvent::CreditDeclined(_)
            | AccountingEvent::ExpensesPosted(_)
            | AccountingEvent::AccountOverdrawn(_) => {}
        }
    }

    pub fn check_invariants(&self) -> DomainResult<()> {
        if !(0.0..=CREDIT_LIMIT).contains(&self.taken) {
            return Err(DomainError::invariant(format!(
                "credit taken {} outside [0, {CREDIT_LIMIT}]",
                self.taken
            )));
        }
        if self.debt < self.taken {
            return Err(DomainError::invariant(format!(
                "credit debt {} below amount taken {}",
                self.debt, self.taken
            )));
        }
        Ok(())
    }
}

/// Event: CreditDrawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditDrawn {
    pub day: u32,
    pub amount: f64,
}

/// Event: CreditDeclined (non-positive or over headroom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditDeclined {
    pub day: u32,
    pub requested: f64,
    pub headroom: f64,
}

/// Event: InterestAccrued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestAccrued {
    pub day: u32,
    pub interest: f64,
    pub debt_after: f64,
}
