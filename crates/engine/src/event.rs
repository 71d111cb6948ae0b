use serde::{Deserialize, Serialize};

use shopsim_accounting::AccountingEvent;
use shopsim_events::Event;
use shopsim_inventory::InventoryEvent;
use shopsim_purchasing::PurchasingEvent;
use shopsim_sales::SalesEvent;

/// Every event the shop aggregate can emit, grouped by owning module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "module", content = "event", rename_all = "lowercase")]
pub enum ShopEvent {
    Inventory(InventoryEvent),
    Purchasing(PurchasingEvent),
    Sales(SalesEvent),
    Accounting(AccountingEvent),
}

impl ShopEvent {
    /// Events the operator should be told about: rejected purchases,
    /// declined credit, and overdraft warnings.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            ShopEvent::Purchasing(PurchasingEvent::PurchaseRejected(_))
                | ShopEvent::Accounting(AccountingEvent::CreditDeclined(_))
                | ShopEvent::Accounting(AccountingEvent::AccountOverdrawn(_))
        )
    }
}

impl Event for ShopEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ShopEvent::Inventory(e) => e.event_type(),
            ShopEvent::Purchasing(e) => e.event_type(),
            ShopEvent::Sales(e) => e.event_type(),
            ShopEvent::Accounting(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            ShopEvent::Inventory(e) => e.version(),
            ShopEvent::Purchasing(e) => e.version(),
            ShopEvent::Sales(e) => e.version(),
            ShopEvent::Accounting(e) => e.version(),
        }
    }

    fn day(&self) -> u32 {
        match self {
            ShopEvent::Inventory(e) => e.day(),
            ShopEvent::Purchasing(e) => e.day(),
            ShopEvent::Sales(e) => e.day(),
            ShopEvent::Accounting(e) => e.day(),
        }
    }
}

impl From<InventoryEvent> for ShopEvent {
    fn from(value: InventoryEvent) -> Self {
        ShopEvent::Inventory(value)
    }
}

impl From<PurchasingEvent> for ShopEvent {
    fn from(value: PurchasingEvent) -> Self {
        ShopEvent::Purchasing(value)
    }
}

impl From<SalesEvent> for ShopEvent {
    fn from(value: SalesEvent) -> Self {
        ShopEvent::Sales(value)
    }
}

impl From<AccountingEvent> for ShopEvent {
    fn from(value: AccountingEvent) -> Self {
        ShopEvent::Accounting(value)
    }
}
