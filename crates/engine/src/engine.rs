//! The simulation driver.
//!
//! Owns the day counter, the shop state, the random source, and the run
//! journal. Performs no IO: decisions come in through [`DecisionSource`],
//! state goes out through [`DayObserver`].

use thiserror::Error;
use tracing::{debug, info, warn};

use shopsim_accounting::AccountingEvent;
use shopsim_core::{DomainError, RandomSource, RunId, SeededSource};
use shopsim_events::{EventEnvelope, ProjectionError, ProjectionRunner, execute};
use shopsim_purchasing::{OfferGenerator, PurchasingEvent};
use shopsim_sales::DemandModel;

use crate::{
    DayReport, DayView, Decision, RefreshOffer, RunSummary, RunTotals, SIMULATION_DAYS,
    ShopCommand, ShopEvent, ShopState, TradeDay,
};

/// Supplies the operator's decision for a day.
///
/// Called once per day except the terminal one. This is the run's only
/// suspension point.
pub trait DecisionSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn decide(&mut self, view: &DayView<'_>) -> Result<Decision, Self::Error>;
}

/// Receives the state at every day boundary. All methods default to no-ops.
pub trait DayObserver {
    /// After the offer refresh, before the decision is collected.
    fn day_opened(&mut self, _view: &DayView<'_>) {}

    /// After the trading step.
    fn day_closed(&mut self, _report: &DayReport) {}

    fn run_finished(&mut self, _summary: &RunSummary) {}
}

impl DayObserver for () {}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The decision source failed (e.g. its input closed).
    #[error("decision source failed on day {day}")]
    Decision {
        day: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("the run already finished after day {0}")]
    Finished(u32),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Journal(#[from] ProjectionError),
}

/// Sequential fixed-length simulation over one exclusively owned [`ShopState`].
#[derive(Debug)]
pub struct SimulationEngine<R> {
    run_id: RunId,
    seed: Option<u64>,
    rng: R,
    state: ShopState,
    opened: bool,
    finished: bool,
    journal: Vec<EventEnvelope<ShopEvent>>,
    totals: ProjectionRunner<RunTotals>,
}

impl SimulationEngine<SeededSource> {
    /// Engine drawing from a `StdRng` seeded with `seed`; same seed, same run.
    pub fn seeded(seed: u64) -> Self {
        let mut engine = Self::new(SeededSource::new(seed));
        engine.seed = Some(seed);
        engine
    }
}

impl<R: RandomSource> SimulationEngine<R> {
    pub fn new(rng: R) -> Self {
        let run_id = RunId::new();
        Self {
            run_id,
            seed: None,
            rng,
            state: ShopState::opening(),
            opened: false,
            finished: false,
            journal: Vec::new(),
            totals: ProjectionRunner::new_for_run(run_id, RunTotals::default()),
        }
    }

    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = run_id;
        self.totals = ProjectionRunner::new_for_run(run_id, self.totals.into_projection());
        self
    }

    /// Start from `state` instead of the opening state.
    pub fn with_state(mut self, state: ShopState) -> Self {
        self.finished = false;
        self.opened = false;
        self.state = state;
        self
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn state(&self) -> &ShopState {
        &self.state
    }

    pub fn view(&self) -> DayView<'_> {
        DayView::new(&self.state)
    }

    pub fn journal(&self) -> &[EventEnvelope<ShopEvent>] {
        &self.journal
    }

    pub fn totals(&self) -> &RunTotals {
        self.totals.projection()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Refresh the offer if today is a refresh day.
    ///
    /// Idempotent within a day: a second call draws nothing.
    pub fn open_day(&mut self) -> Result<Option<ShopEvent>, EngineError> {
        if self.finished {
            return Err(EngineError::Finished(self.state.day));
        }
        if self.opened {
            return Ok(None);
        }
        let day = self.state.day;
        self.opened = true;

        let Some(offer) = OfferGenerator::STANDARD.refresh(day, &mut self.rng) else {
            return Ok(None);
        };
        let events = execute(
            &mut self.state,
            &ShopCommand::RefreshOffer(RefreshOffer { day, offer }),
        )?;
        debug!(volume = offer.volume, unit_price = offer.unit_price, "wholesale offer refreshed");
        self.record(day, &events)?;
        Ok(events.into_iter().next())
    }

    /// Run the trading step for today and advance the counter.
    ///
    /// `None` trades with [`Decision::idle`], which is what the terminal day uses.
    pub fn close_day(&mut self, decision: Option<Decision>) -> Result<DayReport, EngineError> {
        self.open_day()?;

        let day = self.state.day;
        let supplied = decision.is_some();
        let decision = match decision {
            Some(d) => d.clamped(&self.state),
            None => Decision::idle(&self.state),
        };
        let demand_noise = DemandModel::STANDARD.draw_noise(&mut self.rng);

        let events = execute(
            &mut self.state,
            &ShopCommand::TradeDay(TradeDay {
                day,
                decision: decision.clone(),
                demand_noise,
            }),
        )?;
        self.state.check_invariants()?;
        self.record(day, &events)?;

        debug!(
            account = self.state.account,
            demand = self.state.demand,
            sold = self.state.sold,
            lost = self.state.lost,
            "day closed"
        );

        let report = DayReport {
            day,
            decision: supplied.then_some(decision),
            events,
            state: self.state.clone(),
        };

        if day >= SIMULATION_DAYS {
            self.finished = true;
        } else {
            self.state.advance_day();
            self.opened = false;
        }
        Ok(report)
    }

    /// Drive the run to completion.
    pub fn run<D, O>(mut self, decisions: &mut D, observer: &mut O) -> Result<RunSummary, EngineError>
    where
        D: DecisionSource,
        O: DayObserver,
    {
        let run_span = tracing::info_span!("run", run_id = %self.run_id, seed = ?self.seed);
        let _run = run_span.enter();
        info!(days = SIMULATION_DAYS, "simulation started");

        while !self.finished {
            let day = self.state.day;
            let day_span = tracing::debug_span!("day", day);
            let _day = day_span.enter();

            self.open_day()?;
            let view = self.view();
            observer.day_opened(&view);

            let decision = if view.expects_decision() {
                let d = decisions
                    .decide(&view)
                    .map_err(|e| EngineError::Decision {
                        day,
                        source: Box::new(e),
                    })?;
                Some(d)
            } else {
                None
            };

            let report = self.close_day(decision)?;
            observer.day_closed(&report);
        }

        let summary = self.summary();
        info!(
            account = summary.account(),
            credit_debt = summary.credit_debt(),
            "simulation finished"
        );
        observer.run_finished(&summary);
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            run_id: self.run_id,
            seed: self.seed,
            days: self.state.day,
            state: self.state.clone(),
            totals: self.totals.projection().clone(),
        }
    }

    fn record(&mut self, day: u32, events: &[ShopEvent]) -> Result<(), EngineError> {
        for event in events {
            log_event(event);
            let envelope =
                EventEnvelope::new(self.run_id, day, self.journal.len() as u64 + 1, event.clone());
            self.totals.apply(&envelope)?;
            self.journal.push(envelope);
        }
        Ok(())
    }
}

fn log_event(event: &ShopEvent) {
    match event {
        ShopEvent::Purchasing(PurchasingEvent::PurchaseRejected(e)) => {
            info!(cost = e.cost, available = e.available, "not enough money, batch rejected");
        }
        ShopEvent::Purchasing(PurchasingEvent::BatchPurchased(e)) => {
            info!(volume = e.volume, cost = e.cost, "batch purchased");
        }
        ShopEvent::Accounting(AccountingEvent::AccountOverdrawn(e)) => {
            warn!(balance = e.balance, "account is overdrawn");
        }
        ShopEvent::Accounting(AccountingEvent::CreditDeclined(e)) => {
            info!(requested = e.requested, headroom = e.headroom, "credit request declined");
        }
        ShopEvent::Accounting(AccountingEvent::CreditDrawn(e)) => {
            debug!(amount = e.amount, "credit drawn");
        }
        ShopEvent::Accounting(AccountingEvent::InterestAccrued(e)) => {
            debug!(interest = e.interest, debt = e.debt_after, "interest accrued");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsim_core::ScriptedSource;

    #[test]
    fn open_day_twice_draws_once() {
        let mut engine = SimulationEngine::new(ScriptedSource::new(vec![5, -2]));
        let first = engine.open_day().unwrap();
        assert!(first.is_some());
        assert_eq!(engine.state().offer.volume, 45.0);
        assert_eq!(engine.state().offer.unit_price, 33.0);
        assert!(engine.open_day().unwrap().is_none());
        assert_eq!(engine.journal().len(), 1);
    }

    #[test]
    fn close_day_advances_and_journals_in_sequence() {
        let mut engine = SimulationEngine::new(ScriptedSource::constant(0));
        let report = engine
            .close_day(Some(Decision {
                transfer_vol: 50.0,
                accept_offer: false,
                credit_request: None,
                ret_price: 20.0,
            }))
            .unwrap();
        assert_eq!(report.day, 1);
        assert_eq!(report.state.stores.basic, 310.0);
        assert_eq!(engine.state().day, 2);

        let seqs: Vec<u64> = engine.journal().iter().map(|e| e.sequence_number()).collect();
        let expected: Vec<u64> = (1..=seqs.len() as u64).collect();
        assert_eq!(seqs, expected);
        assert!(engine.journal().iter().all(|e| e.run_id() == engine.run_id()));
    }

    #[test]
    fn terminal_day_finishes_and_refuses_more() {
        let mut state = ShopState::opening();
        state.day = SIMULATION_DAYS;
        let mut engine = SimulationEngine::new(ScriptedSource::constant(0)).with_state(state);
        let report = engine.close_day(None).unwrap();
        assert_eq!(report.decision, None);
        assert!(engine.is_finished());
        assert_eq!(engine.state().day, SIMULATION_DAYS);
        assert!(matches!(engine.close_day(None), Err(EngineError::Finished(_))));
    }

    #[test]
    fn with_run_id_repins_the_totals() {
        let run_id = RunId::new();
        let mut engine = SimulationEngine::new(ScriptedSource::constant(0)).with_run_id(run_id);
        engine.close_day(None).unwrap();
        assert_eq!(engine.summary().run_id, run_id);
        assert_eq!(engine.totals().days_traded, 1);
    }
}
