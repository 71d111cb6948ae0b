//! Sales domain module (event-sourced).
//!
//! Price-driven stochastic demand and the daily sale against shop-front stock.
//! Pure deterministic domain logic (no IO); demand noise is injected.

pub mod demand;
pub mod sale;

pub use demand::DemandModel;
pub use sale::{
    INITIAL_RET_PRICE, RET_PRICE_MAX, RET_PRICE_MIN, RetailPriceSet, SaleRecorded, SalesEvent,
    clamp_price, record_sale,
};
