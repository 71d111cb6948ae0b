//! Whole-run tests: the engine driven for all days through its boundaries.

use std::convert::Infallible;

use proptest::prelude::*;

use shopsim_accounting::CREDIT_LIMIT;
use shopsim_engine::{
    DayObserver, DayReport, DayView, Decision, DecisionSource, EngineError, RunSummary,
    RunTotals, SIMULATION_DAYS, ShopState, SimulationEngine,
};
use shopsim_events::ProjectionRunner;
use shopsim_purchasing::OfferGenerator;

/// Replays a fixed list of decisions, cycling when it runs out.
struct Scripted {
    decisions: Vec<Decision>,
    calls: usize,
}

impl Scripted {
    fn new(decisions: Vec<Decision>) -> Self {
        Self { decisions, calls: 0 }
    }
}

impl DecisionSource for Scripted {
    type Error = Infallible;

    fn decide(&mut self, _view: &DayView<'_>) -> Result<Decision, Self::Error> {
        let d = self.decisions[self.calls % self.decisions.len()].clone();
        self.calls += 1;
        Ok(d)
    }
}

/// Collects every opening and closing state.
#[derive(Default)]
struct Recorder {
    opened: Vec<ShopState>,
    closed: Vec<DayReport>,
    finished: Option<RunSummary>,
}

impl DayObserver for Recorder {
    fn day_opened(&mut self, view: &DayView<'_>) {
        assert_eq!(view.total_days, SIMULATION_DAYS);
        self.opened.push(view.state.clone());
    }

    fn day_closed(&mut self, report: &DayReport) {
        self.closed.push(report.clone());
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        self.finished = Some(summary.clone());
    }
}

#[derive(Debug, thiserror::Error)]
#[error("operator walked away")]
struct WalkedAway;

struct FailsOnDay(u32);

impl DecisionSource for FailsOnDay {
    type Error = WalkedAway;

    fn decide(&mut self, view: &DayView<'_>) -> Result<Decision, Self::Error> {
        if view.day() == self.0 {
            return Err(WalkedAway);
        }
        Ok(Decision::idle(view.state))
    }
}

fn steady() -> Decision {
    Decision {
        transfer_vol: 40.0,
        accept_offer: true,
        credit_request: None,
        ret_price: 25.0,
    }
}

#[test]
fn full_run_covers_every_day_and_skips_the_last_decision() {
    let mut source = Scripted::new(vec![steady()]);
    let mut recorder = Recorder::default();
    let summary = SimulationEngine::seeded(7)
        .run(&mut source, &mut recorder)
        .unwrap();

    assert_eq!(source.calls, (SIMULATION_DAYS - 1) as usize);
    assert_eq!(recorder.opened.len(), SIMULATION_DAYS as usize);
    assert_eq!(recorder.closed.len(), SIMULATION_DAYS as usize);
    assert!(recorder.closed[..99].iter().all(|r| r.decision.is_some()));
    assert_eq!(recorder.closed[99].decision, None);

    assert_eq!(summary.days, SIMULATION_DAYS);
    assert_eq!(summary.seed, Some(7));
    assert_eq!(summary.totals.days_traded, SIMULATION_DAYS);
    assert_eq!(summary.totals.offers_refreshed, 10);
    assert_eq!(recorder.finished.as_ref(), Some(&summary));

    let opening = ShopState::opening();
    let expected_account = opening.account + summary.totals.net_cash_flow();
    assert!((summary.account() - expected_account).abs() < 1e-6);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut source = Scripted::new(vec![steady()]);
        SimulationEngine::seeded(seed).run(&mut source, &mut ()).unwrap()
    };
    let a = run(99);
    let b = run(99);
    assert_eq!(a.state, b.state);
    assert_eq!(a.totals, b.totals);
}

#[test]
fn decision_source_failure_stops_the_run() {
    let err = SimulationEngine::seeded(1)
        .run(&mut FailsOnDay(3), &mut ())
        .unwrap_err();
    match err {
        EngineError::Decision { day, source } => {
            assert_eq!(day, 3);
            assert_eq!(source.to_string(), "operator walked away");
        }
        other => panic!("Expected decision error, got {other:?}"),
    }
}

#[test]
fn big_early_loan_is_never_repaid() {
    let mut decisions = vec![Decision {
        credit_request: Some(20_000.0),
        ..steady()
    }];
    decisions.extend(std::iter::repeat_n(steady(), 10));
    let mut source = Scripted::new(decisions);
    let mut recorder = Recorder::default();
    let summary = SimulationEngine::seeded(3).run(&mut source, &mut recorder).unwrap();

    // The script cycles, so 20 000 is asked for on days 1, 12, 23, ...; the
    // third ask exceeds the remaining 10 000 and every later one is declined.
    assert_eq!(summary.state.credit.taken, 40_000.0);
    assert!(summary.state.credit.taken <= CREDIT_LIMIT);
    assert!(summary.credit_debt() > 40_000.0);
    assert_eq!(summary.totals.credit_drawn, 40_000.0);
    assert!(summary.totals.credit_requests_declined > 0);
    assert!(summary.totals.interest_paid > 0.0);
}

#[test]
fn journal_replay_rebuilds_the_totals() {
    let mut engine = SimulationEngine::seeded(11);
    while !engine.is_finished() {
        engine.open_day().unwrap();
        let decision = if engine.view().expects_decision() {
            Some(steady())
        } else {
            None
        };
        engine.close_day(decision).unwrap();
    }

    let (rebuilt, cursor) =
        ProjectionRunner::rebuild_from_scratch(RunTotals::default, engine.journal()).unwrap();
    assert_eq!(&rebuilt, engine.totals());
    assert_eq!(
        cursor.unwrap().last_sequence_number(),
        engine.journal().len() as u64
    );
}

prop_compose! {
    fn arb_decision()(
        transfer_vol in -20.0f64..200.0,
        accept_offer in any::<bool>(),
        credit in prop::option::of(0.0f64..30_000.0),
        ret_price in 5.0f64..60.0,
    ) -> Decision {
        Decision { transfer_vol, accept_offer, credit_request: credit, ret_price }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: over a whole run with arbitrary decisions, stock never goes
    /// negative, credit only grows and stays within the limit, and offers
    /// change only on refresh days while staying in bounds.
    #[test]
    fn run_invariants_hold_for_any_decisions(
        seed in any::<u64>(),
        decisions in prop::collection::vec(arb_decision(), 1..20),
    ) {
        let mut source = Scripted::new(decisions);
        let mut recorder = Recorder::default();
        SimulationEngine::seeded(seed).run(&mut source, &mut recorder).unwrap();

        let mut prev: Option<&ShopState> = None;
        for (opened, report) in recorder.opened.iter().zip(&recorder.closed) {
            let closed = &report.state;
            prop_assert!(closed.stores.basic >= 0.0);
            prop_assert!(closed.stores.shop >= 0.0);
            prop_assert!(closed.credit.taken <= CREDIT_LIMIT);
            prop_assert!((10.0..=50.0).contains(&closed.ret_price));
            prop_assert!(OfferGenerator::STANDARD.admits(&opened.offer));
            prop_assert!((closed.lost - (closed.demand - closed.sold)).abs() < 1e-9);
            prop_assert!(closed.sold <= closed.demand + 1e-9);

            if let Some(p) = prev {
                prop_assert!(closed.credit.taken >= p.credit.taken);
                if p.credit.debt > 0.0 {
                    prop_assert!(closed.credit.debt >= p.credit.debt);
                }
                if !OfferGenerator::is_refresh_day(opened.day) {
                    prop_assert_eq!(opened.offer, p.offer);
                }
            }
            prev = Some(closed);
        }
    }
}
