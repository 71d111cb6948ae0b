//! Text rendering of the day-by-day report.

use std::io::{self, BufRead, Empty, Write};

use tracing::warn;

use shopsim_accounting::{AccountingEvent, CREDIT_LIMIT};
use shopsim_engine::{DayObserver, DayReport, DayView, RunSummary, ShopEvent, ShopState};
use shopsim_purchasing::PurchasingEvent;

use crate::console::SharedInput;

const RULE: &str = "========================================";

/// Writes the state block at the start of each day, the outcome lines after
/// it closes, and the final result.
pub struct ConsoleReport<R, W> {
    out: W,
    pause: Option<SharedInput<R>>,
}

impl<W: Write> ConsoleReport<Empty, W> {
    pub fn new(out: W) -> Self {
        Self { out, pause: None }
    }
}

impl<R: BufRead, W: Write> ConsoleReport<R, W> {
    /// Wait for Enter on `input` after every day but the last.
    pub fn with_pause<P: BufRead>(self, input: SharedInput<P>) -> ConsoleReport<P, W> {
        ConsoleReport {
            out: self.out,
            pause: Some(input),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_closed(&mut self, report: &DayReport) -> io::Result<()> {
        for event in &report.events {
            if let Some(line) = outcome_line(event) {
                writeln!(self.out, "  {line}")?;
            }
        }
        writeln!(
            self.out,
            "  Sold {:.2} of {:.2} demanded at {:.2}, income {:.2}",
            report.state.sold, report.state.demand, report.state.ret_price, report.state.income
        )?;
        self.out.flush()?;

        if report.state.is_terminal_day() {
            return Ok(());
        }
        if let Some(input) = &self.pause {
            write!(self.out, "Press Enter to continue...")?;
            self.out.flush()?;
            if let Err(err) = input.next_line() {
                warn!(error = %err, "pause input unavailable; continuing");
            }
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "RESULT after {} days", summary.days)?;
        writeln!(self.out, "Final account:           {:.2}", summary.account())?;
        writeln!(self.out, "Credit debt:             {:.2}", summary.credit_debt())?;
        writeln!(self.out, "{RULE}")?;
        self.out.flush()
    }
}

/// Full state block for the opening of a day.
pub fn write_state(out: &mut impl Write, view: &DayView<'_>) -> io::Result<()> {
    let s: &ShopState = view.state;
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "DAY {} of {}", view.day(), view.total_days)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Account:                 {:.2}", s.account)?;
    writeln!(out, "Warehouse stock:         {:.2}", s.stores.basic)?;
    writeln!(out, "Shop stock:              {:.2}", s.stores.shop)?;
    writeln!(out, "Demand:                  {:.2}", s.demand)?;
    writeln!(out, "Sale price:              {:.2}", s.ret_price)?;
    writeln!(out, "Income:                  {:.2}", s.income)?;
    writeln!(out, "Sold:                    {:.2}", s.sold)?;
    writeln!(out, "Lost sales:              {:.2}", s.lost)?;
    writeln!(out, "-- Wholesale offer --")?;
    writeln!(out, "Volume:                  {:.2}", s.offer.volume)?;
    writeln!(out, "Unit price:              {:.2}", s.offer.unit_price)?;
    writeln!(out, "Total cost:              {:.2}", s.offer.cost())?;
    writeln!(out, "-- Credit --")?;
    writeln!(out, "Limit:                   {CREDIT_LIMIT:.2}")?;
    writeln!(out, "Taken:                   {:.2}", s.credit.taken)?;
    writeln!(out, "Debt:                    {:.2}", s.credit.debt)?;
    out.flush()
}

/// One line for events the operator sees after a day closes.
pub fn outcome_line(event: &ShopEvent) -> Option<String> {
    match event {
        ShopEvent::Purchasing(PurchasingEvent::BatchPurchased(e)) => Some(format!(
            "Bought {:.0} units at {:.2} for {:.2}",
            e.volume, e.unit_price, e.cost
        )),
        ShopEvent::Purchasing(PurchasingEvent::PurchaseRejected(e)) => Some(format!(
            "Not enough money for the batch: costs {:.2}, account holds {:.2}",
            e.cost, e.available
        )),
        ShopEvent::Accounting(AccountingEvent::CreditDrawn(e)) => {
            Some(format!("Credit granted: {:.2}", e.amount))
        }
        ShopEvent::Accounting(AccountingEvent::CreditDeclined(e)) => Some(format!(
            "Credit of {:.2} declined: only {:.2} left on the line",
            e.requested, e.headroom
        )),
        ShopEvent::Accounting(AccountingEvent::InterestAccrued(e)) => Some(format!(
            "Interest charged: {:.2} (debt now {:.2})",
            e.interest, e.debt_after
        )),
        ShopEvent::Accounting(AccountingEvent::AccountOverdrawn(e)) => Some(format!(
            "WARNING: account is overdrawn ({:.2})",
            e.balance
        )),
        _ => None,
    }
}

impl<R: BufRead, W: Write> DayObserver for ConsoleReport<R, W> {
    fn day_opened(&mut self, view: &DayView<'_>) {
        if let Err(err) = write_state(&mut self.out, view) {
            warn!(day = view.day(), error = %err, "failed to write day state");
        }
    }

    fn day_closed(&mut self, report: &DayReport) {
        if let Err(err) = self.write_closed(report) {
            warn!(day = report.day, error = %err, "failed to write day outcome");
        }
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        if let Err(err) = self.write_summary(summary) {
            warn!(error = %err, "failed to write run summary");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use shopsim_engine::SimulationEngine;

    #[test]
    fn state_block_shows_every_field() {
        let state = ShopState::opening();
        let mut out = Vec::new();
        write_state(&mut out, &DayView::new(&state)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("DAY 1 of 100"));
        assert!(text.contains("Account:                 10000.00"));
        assert!(text.contains("Warehouse stock:         360.00"));
        assert!(text.contains("Shop stock:              80.00"));
        assert!(text.contains("Total cost:              1400.00"));
        assert!(text.contains("Limit:                   50000.00"));
    }

    #[test]
    fn closed_day_lists_purchase_and_pauses() {
        let mut engine = SimulationEngine::seeded(5);
        engine.open_day().unwrap();
        let decision = shopsim_engine::Decision {
            transfer_vol: 10.0,
            accept_offer: true,
            credit_request: None,
            ret_price: 20.0,
        };
        let report = engine.close_day(Some(decision)).unwrap();

        let input = SharedInput::new(Cursor::new(b"\n".to_vec()));
        let mut console = ConsoleReport::new(Vec::new()).with_pause(input);
        console.day_closed(&report);
        let text = String::from_utf8(console.into_inner()).unwrap();
        let bought = report
            .events
            .iter()
            .filter_map(outcome_line)
            .find(|line| line.starts_with("Bought "))
            .expect("the opening account covers any offer");
        assert!(text.contains(&bought));
        assert!(text.contains("Press Enter to continue..."));
    }

    #[test]
    fn summary_banner() {
        let summary = SimulationEngine::seeded(1)
            .run(&mut IdleDecisions, &mut ())
            .unwrap();
        let mut console = ConsoleReport::new(Vec::new());
        console.run_finished(&summary);
        let text = String::from_utf8(console.into_inner()).unwrap();
        assert!(text.contains("RESULT after 100 days"));
        assert!(text.contains(&format!("Final account:           {:.2}", summary.account())));
        assert!(text.contains("Credit debt:             0.00"));
    }

    struct IdleDecisions;

    impl shopsim_engine::DecisionSource for IdleDecisions {
        type Error = std::convert::Infallible;

        fn decide(&mut self, view: &DayView<'_>) -> Result<shopsim_engine::Decision, Self::Error> {
            Ok(shopsim_engine::Decision::idle(view.state))
        }
    }
}
