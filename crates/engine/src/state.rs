//! The shop's economic state.

use serde::{Deserialize, Serialize};

use shopsim_accounting::{CreditLine, INIT_ACCOUNT};
use shopsim_core::{AggregateRoot, DomainError, DomainResult};
use shopsim_inventory::Stores;
use shopsim_purchasing::{OfferGenerator, WholesaleOffer};
use shopsim_sales::{INITIAL_RET_PRICE, RET_PRICE_MAX, RET_PRICE_MIN};

/// Length of a run in days.
pub const SIMULATION_DAYS: u32 = 100;

/// Tolerance for float identities such as `sold + lost == demand`.
const EPSILON: f64 = 1e-6;

/// Aggregate root: the single shop state owned by the engine.
///
/// `demand`, `sold`, `lost`, and `income` describe the most recently closed
/// day; they are overwritten by every trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopState {
    /// 1-based, `1 <= day <= SIMULATION_DAYS`.
    pub day: u32,
    /// Cash balance; may be negative.
    pub account: f64,
    pub stores: Stores,
    pub demand: f64,
    pub sold: f64,
    pub lost: f64,
    pub income: f64,
    /// Sale price, within `[10, 50]`.
    pub ret_price: f64,
    pub offer: WholesaleOffer,
    pub credit: CreditLine,
    version: u64,
}

impl ShopState {
    /// Opening state on day 1.
    pub fn opening() -> Self {
        Self {
            day: 1,
            account: INIT_ACCOUNT,
            stores: Stores::opening(),
            demand: 0.0,
            sold: 0.0,
            lost: 0.0,
            income: 0.0,
            ret_price: INITIAL_RET_PRICE,
            offer: OfferGenerator::STANDARD.base_offer(),
            credit: CreditLine::default(),
            version: 0,
        }
    }

    pub fn is_terminal_day(&self) -> bool {
        self.day >= SIMULATION_DAYS
    }

    /// Move to the next day. Returns `false` (and stays put) on the terminal day.
    pub fn advance_day(&mut self) -> bool {
        if self.is_terminal_day() {
            return false;
        }
        self.day += 1;
        true
    }

    pub fn check_invariants(&self) -> DomainResult<()> {
        if !(1..=SIMULATION_DAYS).contains(&self.day) {
            return Err(DomainError::invariant(format!(
                "day {} outside [1, {SIMULATION_DAYS}]",
                self.day
            )));
        }
        if !self.account.is_finite() {
            return Err(DomainError::invariant("account balance is not finite"));
        }
        if self.stores.basic < 0.0 || self.stores.shop < 0.0 {
            return Err(DomainError::invariant(format!(
                "negative stock (basic={}, shop={})",
                self.stores.basic, self.stores.shop
            )));
        }
        if !(RET_PRICE_MIN..=RET_PRICE_MAX).contains(&self.ret_price) {
            return Err(DomainError::invariant(format!(
                "sale price {} outside [{RET_PRICE_MIN}, {RET_PRICE_MAX}]",
                self.ret_price
            )));
        }
        if !OfferGenerator::STANDARD.admits(&self.offer) {
            return Err(DomainError::invariant(format!(
                "offer {:?} outside market bounds",
                self.offer
            )));
        }
        if self.sold < 0.0 || self.lost < 0.0 || (self.sold + self.lost - self.demand).abs() > EPSILON
        {
            return Err(DomainError::invariant(format!(
                "sold {} + lost {} does not partition demand {}",
                self.sold, self.lost, self.demand
            )));
        }
        self.credit.check_invariants()
    }
}

impl Default for ShopState {
    fn default() -> Self {
        Self::opening()
    }
}

impl AggregateRoot for ShopState {
    fn version(&self) -> u64 {
        self.version
    }
}

impl ShopState {
    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}
