use serde::{Deserialize, Serialize};

use shopsim_core::{ValueObject, clamp_finite};
use shopsim_events::Event;

/// Opening warehouse stock (units).
pub const BASIC_STORE_INIT: f64 = 360.0;
/// Opening shop-front stock (units).
pub const SHOP_STORE_INIT: f64 = 80.0;

/// Stock levels at both locations. Both are always `>= 0`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stores {
    /// Warehouse stock.
    pub basic: f64,
    /// Shop-front stock, the only location customers buy from.
    pub shop: f64,
}

impl ValueObject for Stores {}

impl Stores {
    pub fn opening() -> Self {
        Self {
            basic: BASIC_STORE_INIT,
            shop: SHOP_STORE_INIT,
        }
    }

    /// Clamp a requested transfer volume to `[0, basic]`.
    ///
    /// The decision collector is expected to clamp already; this re-clamps
    /// against the stock at the moment the transfer executes.
    pub fn clamp_transfer(&self, requested: f64) -> f64 {
        clamp_finite(requested, 0.0, self.basic, 0.0)
    }

    /// Decide the day's transfer. Nothing is emitted for a zero volume.
    pub fn plan_transfer(&self, day: u32, requested: f64) -> Option<InventoryEvent> {
        let units = self.clamp_transfer(requested);
        if units <= 0.0 {
            return None;
        }
        Some(InventoryEvent::StockTransferred(StockTransferred { day, units }))
    }

    /// Units a sale can actually take: `min(shop, demand)`.
    pub fn sellable(&self, demand: f64) -> f64 {
        self.shop.min(demand.max(0.0))
    }

    /// Add a delivered batch to the warehouse.
    pub fn receive(&mut self, units: f64) {
        self.basic += units;
    }

    /// Remove sold units from the shop front.
    pub fn withdraw_sold(&mut self, units: f64) {
        self.shop = (self.shop - units).max(0.0);
    }

    pub fn apply(&mut self, event: &InventoryEvent) {
        match event {
            InventoryEvent::StockTransferred(e) => {
                // Floor at zero: float subtraction of an exact clamp can land at -0.0 or a hair below.
                self.basic = (self.basic - e.units).max(0.0);
                self.shop += e.units;
            }
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::opening()
    }
}

/// Event: StockTransferred (warehouse → shop front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransferred {
    pub day: u32,
    pub units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryEvent {
    StockTransferred(StockTransferred),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::StockTransferred(_) => "inventory.stock.transferred",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn day(&self) -> u32 {
        match self {
            InventoryEvent::StockTransferred(e) => e.day,
        }
    }
}
