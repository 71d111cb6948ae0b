//! What the engine hands to the output boundary.

use serde::Serialize;

use shopsim_core::RunId;

use crate::{Decision, RunTotals, SIMULATION_DAYS, ShopEvent, ShopState};

/// Opening view of a day, shown before the decision is collected.
#[derive(Debug, Clone, Copy)]
pub struct DayView<'a> {
    pub state: &'a ShopState,
    pub total_days: u32,
}

impl<'a> DayView<'a> {
    pub fn new(state: &'a ShopState) -> Self {
        Self {
            state,
            total_days: SIMULATION_DAYS,
        }
    }

    pub fn day(&self) -> u32 {
        self.state.day
    }

    /// No decision is collected on the terminal day.
    pub fn expects_decision(&self) -> bool {
        !self.state.is_terminal_day()
    }
}

/// Outcome of one closed day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    pub day: u32,
    /// The decision as applied (after clamping), or `None` on the terminal day.
    pub decision: Option<Decision>,
    /// Events of the trading step, in order. The day's offer refresh, if any,
    /// was reported when the day opened and is in the journal, not here.
    pub events: Vec<ShopEvent>,
    /// State at the close of the day, before the counter advances.
    pub state: ShopState,
}

impl DayReport {
    /// Rejected purchases, declined credit, and overdraft warnings.
    pub fn notices(&self) -> impl Iterator<Item = &ShopEvent> {
        self.events.iter().filter(|e| e.is_notice())
    }

    pub fn is_overdrawn(&self) -> bool {
        self.state.account < 0.0
    }
}

/// Final outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: RunId,
    /// Seed of the random source, when the run was seeded.
    pub seed: Option<u64>,
    pub days: u32,
    pub state: ShopState,
    pub totals: RunTotals,
}

impl RunSummary {
    pub fn account(&self) -> f64 {
        self.state.account
    }

    pub fn credit_debt(&self) -> f64 {
        self.state.credit.debt
    }
}
