use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shoplite_catalog::{Item, ItemId, Location, LocationId};
use shoplite_ledger::{StockLedger, StockMovement};
use shoplite_orders::{Order, OrderId};

use crate::settings::ShopSettings;

/// All persisted state for one tenant's shop.
///
/// This is the content of the per-tenant blob. It is a plain value: cloneable,
/// serializable, mutated only through the command methods in
/// [`crate::commands`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopState {
    pub(crate) items: BTreeMap<ItemId, Item>,
    pub(crate) locations: BTreeMap<LocationId, Location>,
    pub(crate) orders: BTreeMap<OrderId, Order>,
    pub(crate) movements: Vec<StockMovement>,
    pub(crate) settings: ShopSettings,
}

impl ShopState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn movements(&self) -> &[StockMovement] {
        &self.movements
    }

    pub fn settings(&self) -> &ShopSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ShopSettings {
        &mut self.settings
    }

    /// Borrow the stock ledger view (items + movement log together).
    pub fn ledger(&mut self) -> StockLedger<'_> {
        StockLedger::new(&mut self.items, &mut self.movements)
    }
}
