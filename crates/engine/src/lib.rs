//! `shopsim-engine` — the per-day state-transition engine.
//!
//! The shop's state is an event-sourced aggregate: each day a pure `handle`
//! decides the day's events from the state, the operator's [`Decision`], and
//! the pre-drawn demand noise, and `apply` folds them in. [`SimulationEngine`]
//! owns the state and the random source, drives the fixed-length run, and
//! talks to the outside world only through [`DecisionSource`] and
//! [`DayObserver`].

pub mod decision;
pub mod engine;
pub mod event;
pub mod processor;
pub mod report;
pub mod state;
pub mod totals;

pub use decision::Decision;
pub use engine::{DayObserver, DecisionSource, EngineError, SimulationEngine};
pub use event::ShopEvent;
pub use processor::{RefreshOffer, ShopCommand, TradeDay, step};
pub use report::{DayReport, DayView, RunSummary};
pub use state::{SIMULATION_DAYS, ShopState};
pub use totals::RunTotals;
