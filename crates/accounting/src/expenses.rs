use serde::{Deserialize, Serialize};

use shopsim_events::Event;

use crate::credit::{CreditDeclined, CreditDrawn, InterestAccrued};

/// Opening cash balance.
pub const INIT_ACCOUNT: f64 = 10_000.0;

/// Costs debited every day regardless of trading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedExpenses {
    pub daily_spending: f64,
    pub rent: f64,
    pub wages_and_taxes: f64,
}

impl FixedExpenses {
    pub const STANDARD: FixedExpenses = FixedExpenses {
        daily_spending: 700.0,
        rent: 200.0,
        wages_and_taxes: 500.0,
    };

    pub fn total(&self) -> f64 {
        self.daily_spending + self.rent + self.wages_and_taxes
    }

    /// Posted unconditionally, even if it drives the account negative.
    pub fn post(&self, day: u32) -> AccountingEvent {
        AccountingEvent::ExpensesPosted(ExpensesPosted {
            day,
            amount: self.total(),
        })
    }
}

impl Default for FixedExpenses {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Warn when the balance ends the day below zero. Insolvency is not fatal.
pub fn check_overdraft(day: u32, account: f64) -> Option<AccountingEvent> {
    (account < 0.0).then_some(AccountingEvent::AccountOverdrawn(AccountOverdrawn {
        day,
        balance: account,
    }))
}

/// Event: ExpensesPosted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensesPosted {
    pub day: u32,
    pub amount: f64,
}

/// Event: AccountOverdrawn (warning only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountOverdrawn {
    pub day: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccountingEvent {
    CreditDrawn(CreditDrawn),
    CreditDeclined(CreditDeclined),
    InterestAccrued(InterestAccrued),
    ExpensesPosted(ExpensesPosted),
    AccountOverdrawn(AccountOverdrawn),
}

impl AccountingEvent {
    /// Signed effect of this event on the cash account.
    pub fn cash_delta(&self) -> f64 {
        match self {
            AccountingEvent::CreditDrawn(e) => e.amount,
            AccountingEvent::InterestAccrued(e) => -e.interest,
            AccountingEvent::ExpensesPosted(e) => -e.amount,
            AccountingEvent::CreditDeclined(_) | AccountingEvent::AccountOverdrawn(_) => 0.0,
        }
    }
}

impl Event for AccountingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountingEvent::CreditDrawn(_) => "accounting.credit.drawn",
            AccountingEvent::CreditDeclined(_) => "accounting.credit.declined",
            AccountingEvent::InterestAccrued(_) => "accounting.credit.interest_accrued",
            AccountingEvent::ExpensesPosted(_) => "accounting.expenses.posted",
            AccountingEvent::AccountOverdrawn(_) => "accounting.account.overdrawn",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn day(&self) -> u32 {
        match self {
            AccountingEvent::CreditDrawn(e) => e.day,
            AccountingEvent::CreditDeclined(e) => e.day,
            AccountingEvent::InterestAccrued(e) => e.day,
            AccountingEvent::ExpensesPosted(e) => e.day,
            AccountingEvent::AccountOverdrawn(e) => e.day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_expenses_total_fourteen_hundred() {
        assert_eq!(FixedExpenses::STANDARD.total(), 1400.0);
        let ev = FixedExpenses::STANDARD.post(4);
        assert_eq!(ev.cash_delta(), -1400.0);
        assert_eq!(ev.event_type(), "accounting.expenses.posted");
        assert_eq!(ev.day(), 4);
    }

    #[test]
    fn overdraft_only_below_zero() {
        assert!(check_overdraft(1, 0.0).is_none());
        assert!(check_overdraft(1, 12.5).is_none());
        match check_overdraft(7, -0.01) {
            Some(AccountingEvent::AccountOverdrawn(e)) => {
                assert_eq!(e.day, 7);
                assert_eq!(e.balance, -0.01);
            }
            other => panic!("Expected AccountOverdrawn, got {other:?}"),
        }
    }

    #[test]
    fn declined_credit_and_warnings_move_no_cash() {
        let declined = AccountingEvent::CreditDeclined(CreditDeclined {
            day: 1,
            requested: 90_000.0,
            headroom: 50_000.0,
        });
        assert_eq!(declined.cash_delta(), 0.0);
        assert_eq!(check_overdraft(1, -5.0).unwrap().cash_delta(), 0.0);
    }
}
