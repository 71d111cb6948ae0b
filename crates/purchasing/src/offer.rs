use serde::{Deserialize, Serialize};

use shopsim_core::{RandomSource, ValueObject};
use shopsim_events::Event;

/// A fresh offer is drawn on days where `(day - 1) % OFFER_REFRESH_PERIOD == 0`.
pub const OFFER_REFRESH_PERIOD: u32 = 10;

/// Terms of the wholesale batch currently on offer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholesaleOffer {
    /// Units in the batch, within `[30, 50]`.
    pub volume: f64,
    /// Price per unit, within `[30, 40]`.
    pub unit_price: f64,
}

impl ValueObject for WholesaleOffer {}

impl WholesaleOffer {
    /// Total price of taking the whole batch.
    pub fn cost(&self) -> f64 {
        self.volume * self.unit_price
    }
}

/// Draws bounded-random wholesale offers.
///
/// `volume = clamp(volume_base + U[-volume_jitter, volume_jitter], volume_min, volume_max)`,
/// and likewise for the unit price.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OfferGenerator {
    pub volume_base: f64,
    pub volume_jitter: i64,
    pub volume_min: f64,
    pub volume_max: f64,
    pub price_base: f64,
    pub price_jitter: i64,
    pub price_min: f64,
    pub price_max: f64,
}

impl OfferGenerator {
    /// The shop's fixed wholesale market.
    pub const STANDARD: OfferGenerator = OfferGenerator {
        volume_base: 40.0,
        volume_jitter: 10,
        volume_min: 30.0,
        volume_max: 50.0,
        price_base: 35.0,
        price_jitter: 5,
        price_min: 30.0,
        price_max: 40.0,
    };

    pub fn is_refresh_day(day: u32) -> bool {
        day >= 1 && (day - 1) % OFFER_REFRESH_PERIOD == 0
    }

    /// Offer terms before any draw: the base volume and price.
    pub fn base_offer(&self) -> WholesaleOffer {
        WholesaleOffer {
            volume: self.volume_base,
            unit_price: self.price_base,
        }
    }

    /// Draw a new offer unconditionally.
    pub fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> WholesaleOffer {
        let dv = rng.draw_inclusive(-self.volume_jitter, self.volume_jitter);
        let dp = rng.draw_inclusive(-self.price_jitter, self.price_jitter);
        WholesaleOffer {
            volume: (self.volume_base + dv as f64).clamp(self.volume_min, self.volume_max),
            unit_price: (self.price_base + dp as f64).clamp(self.price_min, self.price_max),
        }
    }

    /// Draw a new offer if `day` is a refresh day; otherwise return `None` and
    /// leave the random source untouched, so calling it repeatedly on a
    /// non-refresh day is a no-op.
    pub fn refresh<R: RandomSource + ?Sized>(&self, day: u32, rng: &mut R) -> Option<WholesaleOffer> {
        Self::is_refresh_day(day).then(|| self.draw(rng))
    }

    /// Whether `offer` lies within this market's bounds.
    pub fn admits(&self, offer: &WholesaleOffer) -> bool {
        (self.volume_min..=self.volume_max).contains(&offer.volume)
            && (self.price_min..=self.price_max).contains(&offer.unit_price)
    }
}

impl Default for OfferGenerator {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Decide whether an accepted offer can be paid for from `account`.
///
/// The purchase goes through only when `account >= cost`; otherwise it is
/// rejected and the offer stays open for later days.
pub fn decide_purchase(day: u32, offer: &WholesaleOffer, account: f64) -> PurchasingEvent {
    let cost = offer.cost();
    if account >= cost {
        PurchasingEvent::BatchPurchased(BatchPurchased {
            day,
            volume: offer.volume,
            unit_price: offer.unit_price,
            cost,
        })
    } else {
        PurchasingEvent::PurchaseRejected(PurchaseRejected {
            day,
            cost,
            available: account,
        })
    }
}

/// Event: OfferRefreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRefreshed {
    pub day: u32,
    pub offer: WholesaleOffer,
}

/// Event: BatchPurchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPurchased {
    pub day: u32,
    pub volume: f64,
    pub unit_price: f64,
    pub cost: f64,
}

/// Event: PurchaseRejected (insufficient funds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRejected {
    pub day: u32,
    pub cost: f64,
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PurchasingEvent {
    OfferRefreshed(OfferRefreshed),
    BatchPurchased(BatchPurchased),
    PurchaseRejected(PurchaseRejected),
}

impl Event for PurchasingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PurchasingEvent::OfferRefreshed(_) => "purchasing.offer.refreshed",
            PurchasingEvent::BatchPurchased(_) => "purchasing.batch.purchased",
            PurchasingEvent::PurchaseRejected(_) => "purchasing.batch.rejected",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn day(&self) -> u32 {
        match self {
            PurchasingEvent::OfferRefreshed(e) => e.day,
            PurchasingEvent::BatchPurchased(e) => e.day,
            PurchasingEvent::PurchaseRejected(e) => e.day,
        }
    }
}
