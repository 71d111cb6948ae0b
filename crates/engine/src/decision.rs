use serde::{Deserialize, Serialize};

use shopsim_core::ValueObject;
use shopsim_sales::clamp_price;

use crate::ShopState;

/// The operator's choices for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Units to move from the warehouse to the shop front.
    pub transfer_vol: f64,
    /// Take the current wholesale offer.
    pub accept_offer: bool,
    /// Amount to draw on the credit line; `None` or `0` for no draw.
    #[serde(default)]
    pub credit_request: Option<f64>,
    /// Sale price for today and later days.
    pub ret_price: f64,
}

impl ValueObject for Decision {}

impl Decision {
    /// Do nothing and keep the current price.
    pub fn idle(state: &ShopState) -> Self {
        Self {
            transfer_vol: 0.0,
            accept_offer: false,
            credit_request: None,
            ret_price: state.ret_price,
        }
    }

    /// Clamp transfer volume to `[0, basic]` and price to `[10, 50]`.
    ///
    /// The credit request is left as asked; the ledger declines what it cannot grant.
    pub fn clamped(self, state: &ShopState) -> Self {
        Self {
            transfer_vol: state.stores.clamp_transfer(self.transfer_vol),
            ret_price: clamp_price(self.ret_price, state.ret_price),
            ..self
        }
    }
}
