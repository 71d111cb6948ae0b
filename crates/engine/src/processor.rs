//! Day transaction processing: the shop aggregate's `handle` and `apply`.
//!
//! A trading day runs in a fixed order, each step seeing the previous step's
//! effects:
//!
//! 0. decision intake (credit draw, sale price)
//! 1. warehouse → shop transfer
//! 2. wholesale purchase, if accepted and affordable
//! 3. demand and sale
//! 4. fixed expenses
//! 5. interest on outstanding credit
//! 6. overdraft warning

use serde::{Deserialize, Serialize};

use shopsim_accounting::{FixedExpenses, check_overdraft};
use shopsim_core::{Aggregate, DomainError, DomainResult};
use shopsim_events::execute;
use shopsim_purchasing::{
    OfferGenerator, OfferRefreshed, PurchasingEvent, WholesaleOffer, decide_purchase,
};
use shopsim_sales::{DemandModel, RetailPriceSet, SalesEvent, clamp_price, record_sale};

use crate::{Decision, ShopEvent, ShopState};

/// Command: RefreshOffer (the generator's draw for a refresh day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshOffer {
    pub day: u32,
    pub offer: WholesaleOffer,
}

/// Command: TradeDay.
///
/// `demand_noise` is drawn by the caller before handling, which keeps
/// `handle` free of randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDay {
    pub day: u32,
    pub decision: Decision,
    pub demand_noise: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShopCommand {
    RefreshOffer(RefreshOffer),
    TradeDay(TradeDay),
}

/// Pure transition: the next state and the events that produced it.
///
/// `state` is left untouched.
pub fn step(
    state: &ShopState,
    decision: &Decision,
    demand_noise: i64,
) -> DomainResult<(ShopState, Vec<ShopEvent>)> {
    let mut next = state.clone();
    let events = execute(
        &mut next,
        &ShopCommand::TradeDay(TradeDay {
            day: state.day,
            decision: decision.clone(),
            demand_noise,
        }),
    )?;
    Ok((next, events))
}

impl Aggregate for ShopState {
    type Command = ShopCommand;
    type Event = ShopEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ShopEvent::Inventory(e) => self.stores.apply(e),
            ShopEvent::Purchasing(e) => match e {
                PurchasingEvent::OfferRefreshed(e) => self.offer = e.offer,
                PurchasingEvent::BatchPurchased(e) => {
                    self.account -= e.cost;
                    self.stores.receive(e.volume);
                }
                PurchasingEvent::PurchaseRejected(_) => {}
            },
            ShopEvent::Sales(e) => match e {
                SalesEvent::RetailPriceSet(e) => self.ret_price = e.ret_price,
                SalesEvent::SaleRecorded(e) => {
                    self.demand = e.demand;
                    self.sold = e.sold;
                    self.lost = e.lost;
                    self.income = e.income;
                    self.stores.withdraw_sold(e.sold);
                    self.account += e.income;
                }
            },
            ShopEvent::Accounting(e) => {
                self.credit.apply(e);
                self.account += e.cash_delta();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.bump_version();
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ShopCommand::RefreshOffer(cmd) => self.handle_refresh(cmd),
            ShopCommand::TradeDay(cmd) => self.handle_trade(cmd),
        }
    }
}

impl ShopState {
    fn ensure_day(&self, day: u32) -> DomainResult<()> {
        if self.day != day {
            return Err(DomainError::validation(format!(
                "command for day {day} sent on day {}",
                self.day
            )));
        }
        Ok(())
    }

    fn handle_refresh(&self, cmd: &RefreshOffer) -> DomainResult<Vec<ShopEvent>> {
        self.ensure_day(cmd.day)?;
        if !OfferGenerator::is_refresh_day(cmd.day) {
            return Err(DomainError::validation(format!(
                "day {} is not an offer refresh day",
                cmd.day
            )));
        }
        if !OfferGenerator::STANDARD.admits(&cmd.offer) {
            return Err(DomainError::validation(format!(
                "offer {:?} outside market bounds",
                cmd.offer
            )));
        }
        Ok(vec![ShopEvent::Purchasing(PurchasingEvent::OfferRefreshed(
            OfferRefreshed {
                day: cmd.day,
                offer: cmd.offer,
            },
        ))])
    }

    fn handle_trade(&self, cmd: &TradeDay) -> DomainResult<Vec<ShopEvent>> {
        self.ensure_day(cmd.day)?;

        let day = cmd.day;
        let decision = &cmd.decision;

        // Each step decides against the state left by the previous ones.
        let mut draft = self.clone();
        let mut events = Vec::new();
        let mut emit = |draft: &mut ShopState, event: ShopEvent| {
            draft.apply(&event);
            events.push(event);
        };

        if let Some(amount) = decision.credit_request {
            if let Some(ev) = draft.credit.request(day, amount) {
                emit(&mut draft, ev.into());
            }
        }

        let ret_price = clamp_price(decision.ret_price, draft.ret_price);
        if ret_price != draft.ret_price {
            emit(
                &mut draft,
                SalesEvent::RetailPriceSet(RetailPriceSet { day, ret_price }).into(),
            );
        }

        if let Some(ev) = draft.stores.plan_transfer(day, decision.transfer_vol) {
            emit(&mut draft, ev.into());
        }

        if decision.accept_offer {
            let ev = decide_purchase(day, &draft.offer, draft.account);
            emit(&mut draft, ev.into());
        }

        let demand = DemandModel::STANDARD.demand(draft.ret_price, cmd.demand_noise);
        let sale = record_sale(day, draft.stores.shop, demand, draft.ret_price);
        emit(&mut draft, sale.into());

        emit(&mut draft, FixedExpenses::STANDARD.post(day).into());

        if let Some(ev) = draft.credit.accrue(day) {
            emit(&mut draft, ev.into());
        }

        if let Some(ev) = check_overdraft(day, draft.account) {
            emit(&mut draft, ev.into());
        }

        Ok(events)
    }
}
