//! Inventory domain module (event-sourced).
//!
//! Two stock locations: the warehouse ("basic store") and the shop front.
//! Pure deterministic domain logic (no IO).

pub mod stores;

pub use stores::{
    BASIC_STORE_INIT, InventoryEvent, SHOP_STORE_INIT, StockTransferred, Stores,
};
