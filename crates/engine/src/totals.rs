//! Cumulative run figures, projected from the journal.

use serde::Serialize;

use shopsim_accounting::AccountingEvent;
use shopsim_events::{EventEnvelope, Projection};
use shopsim_inventory::InventoryEvent;
use shopsim_purchasing::PurchasingEvent;
use shopsim_sales::SalesEvent;

use crate::ShopEvent;

/// Read model: running totals over every event of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunTotals {
    pub days_traded: u32,
    pub units_transferred: f64,
    pub units_demanded: f64,
    pub units_sold: f64,
    pub units_lost: f64,
    pub sales_income: f64,
    pub offers_refreshed: u32,
    pub batches_purchased: u32,
    pub units_purchased: f64,
    pub purchase_spend: f64,
    pub purchases_rejected: u32,
    pub expenses: f64,
    pub credit_drawn: f64,
    pub credit_requests_declined: u32,
    pub interest_paid: f64,
    pub days_overdrawn: u32,
}

impl RunTotals {
    /// Net cash effect of everything projected so far.
    pub fn net_cash_flow(&self) -> f64 {
        self.sales_income + self.credit_drawn
            - self.purchase_spend
            - self.expenses
            - self.interest_paid
    }
}

impl Projection for RunTotals {
    type Ev = ShopEvent;

    fn apply(&mut self, envelope: &EventEnvelope<ShopEvent>) {
        match envelope.payload() {
            ShopEvent::Inventory(InventoryEvent::StockTransferred(e)) => {
                self.units_transferred += e.units;
            }
            ShopEvent::Purchasing(e) => match e {
                PurchasingEvent::OfferRefreshed(_) => self.offers_refreshed += 1,
                PurchasingEvent::BatchPurchased(e) => {
                    self.batches_purchased += 1;
                    self.units_purchased += e.volume;
                    self.purchase_spend += e.cost;
                }
                PurchasingEvent::PurchaseRejected(_) => self.purchases_rejected += 1,
            },
            ShopEvent::Sales(SalesEvent::SaleRecorded(e)) => {
                self.days_traded += 1;
                self.units_demanded += e.demand;
                self.units_sold += e.sold;
                self.units_lost += e.lost;
                self.sales_income += e.income;
            }
            ShopEvent::Sales(SalesEvent::RetailPriceSet(_)) => {}
            ShopEvent::Accounting(e) => match e {
                AccountingEvent::CreditDrawn(e) => self.credit_drawn += e.amount,
                AccountingEvent::CreditDeclined(_) => self.credit_requests_declined += 1,
                AccountingEvent::InterestAccrued(e) => self.interest_paid += e.interest,
                AccountingEvent::ExpensesPosted(e) => self.expenses += e.amount,
                AccountingEvent::AccountOverdrawn(_) => self.days_overdrawn += 1,
            },
        }
    }
}
