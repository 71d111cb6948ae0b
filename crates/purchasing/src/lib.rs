//! Purchasing domain module (event-sourced).
//!
//! Periodic randomized wholesale offers and the accept/reject purchase rule.
//! Pure deterministic domain logic (no IO); randomness is injected.

pub mod offer;

pub use offer::{
    BatchPurchased, OFFER_REFRESH_PERIOD, OfferGenerator, OfferRefreshed, PurchaseRejected,
    PurchasingEvent, WholesaleOffer, decide_purchase,
};
