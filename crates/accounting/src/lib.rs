//! Accounting module (event-sourced): cash postings, fixed expenses, and the
//! credit line with daily interest.
//!
//! Pure domain logic only: no IO.

pub mod credit;
pub mod expenses;

pub use credit::{
    CREDIT_LIMIT, CREDIT_RATE, CreditDeclined, CreditDrawn, CreditLine, DAILY_RATE,
    InterestAccrued,
};
pub use expenses::{
    AccountOverdrawn, AccountingEvent, ExpensesPosted, FixedExpenses, INIT_ACCOUNT,
    check_overdraft,
};
