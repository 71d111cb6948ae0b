use serde::{Deserialize, Serialize};

use shopsim_core::clamp_finite;
use shopsim_events::Event;

pub const RET_PRICE_MIN: f64 = 10.0;
pub const RET_PRICE_MAX: f64 = 50.0;
/// Sale price on day 1, before any decision.
pub const INITIAL_RET_PRICE: f64 = 15.0;

/// Clamp a requested sale price to `[RET_PRICE_MIN, RET_PRICE_MAX]`.
/// A NaN request keeps the `current` price.
pub fn clamp_price(requested: f64, current: f64) -> f64 {
    clamp_finite(requested, RET_PRICE_MIN, RET_PRICE_MAX, current)
}

/// Sell `min(shop_stock, demand)` units at `ret_price`.
pub fn record_sale(day: u32, shop_stock: f64, demand: f64, ret_price: f64) -> SalesEvent {
    let demand = demand.max(0.0);
    let sold = shop_stock.max(0.0).min(demand);
    SalesEvent::SaleRecorded(SaleRecorded {
        day,
        ret_price,
        demand,
        sold,
        lost: demand - sold,
        income: sold * ret_price,
    })
}

/// Event: RetailPriceSet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailPriceSet {
    pub day: u32,
    pub ret_price: f64,
}

/// Event: SaleRecorded (the day's demand, sales, and lost sales).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecorded {
    pub day: u32,
    pub ret_price: f64,
    pub demand: f64,
    pub sold: f64,
    pub lost: f64,
    pub income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SalesEvent {
    RetailPriceSet(RetailPriceSet),
    SaleRecorded(SaleRecorded),
}

impl Event for SalesEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SalesEvent::RetailPriceSet(_) => "sales.price.set",
            SalesEvent::SaleRecorded(_) => "sales.day.recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn day(&self) -> u32 {
        match self {
            SalesEvent::RetailPriceSet(e) => e.day,
            SalesEvent::SaleRecorded(e) => e.day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn price_is_clamped() {
        assert_eq!(clamp_price(5.0, 15.0), 10.0);
        assert_eq!(clamp_price(99.0, 15.0), 50.0);
        assert_eq!(clamp_price(f64::NAN, 17.5), 17.5);
    }

    #[test]
    fn stock_limits_the_sale() {
        match record_sale(1, 130.0, 500.0, 20.0) {
            SalesEvent::SaleRecorded(e) => {
                assert_eq!(e.sold, 130.0);
                assert_eq!(e.lost, 370.0);
                assert_eq!(e.income, 2600.0);
            }
            _ => panic!("Expected SaleRecorded event"),
        }
    }

    #[test]
    fn demand_limits_the_sale() {
        match record_sale(1, 130.0, 40.0, 25.0) {
            SalesEvent::SaleRecorded(e) => {
                assert_eq!(e.sold, 40.0);
                assert_eq!(e.lost, 0.0);
                assert_eq!(e.income, 1000.0);
            }
            _ => panic!("Expected SaleRecorded event"),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: sold = min(stock, demand) and lost = demand - sold.
        #[test]
        fn sold_and_lost_partition_demand(
            stock in 0.0f64..1000.0,
            demand in 0.0f64..1000.0,
            price in 10.0f64..=50.0,
        ) {
            let SalesEvent::SaleRecorded(e) = record_sale(1, stock, demand, price) else {
                panic!("Expected SaleRecorded event");
            };
            prop_assert_eq!(e.sold, stock.min(demand));
            prop_assert_eq!(e.lost, demand - e.sold);
            prop_assert!(e.lost >= 0.0);
            prop_assert_eq!(e.income, e.sold * price);
        }
    }
}
