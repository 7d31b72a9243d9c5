use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use shoplite_catalog::{Item, ItemId, Location, LocationId};
use shoplite_core::{DomainError, DomainResult, EntityId};
use shoplite_ledger::{MovementId, MovementKind, StockLedger, StockLine};
use shoplite_orders::{LedgerEffect, Order, OrderId, OrderLine, OrderStatus};

use crate::state::ShopState;

/// Command surface over [`ShopState`].
///
/// Each method is one user-visible operation: validate, mutate, log. Callers
/// persist the state after every successful command (write-on-mutation).
impl ShopState {
    // ---- locations ----

    pub fn add_location(&mut self, name: impl Into<String>) -> DomainResult<LocationId> {
        let id = LocationId::new(EntityId::new());
        let location = Location::new(id, name)?;
        tracing::info!(location_id = %id, name = location.name(), "adding location");
        self.locations.insert(id, location);
        Ok(id)
    }

    /// Remove a location. Items keep their stock entries for it; history
    /// rendering degrades to "unknown location" on the caller's side.
    pub fn remove_location(&mut self, id: LocationId) -> DomainResult<Location> {
        self.locations.remove(&id).ok_or(DomainError::NotFound)
    }

    // ---- items ----

    pub fn create_item(
        &mut self,
        name: impl Into<String>,
        category: impl Into<String>,
        price: u64,
        tax_rate_bps: u16,
        now: DateTime<Utc>,
    ) -> DomainResult<ItemId> {
        let id = ItemId::new(EntityId::new());
        let item = Item::new(id, name, category, price, tax_rate_bps, now)?;
        tracing::info!(item_id = %id, name = item.name(), "creating item");
        self.items.insert(id, item);
        Ok(id)
    }

    pub fn rename_item(
        &mut self,
        id: ItemId,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.items
            .get_mut(&id)
            .ok_or(DomainError::NotFound)?
            .rename(name, now)
    }

    pub fn set_item_price(&mut self, id: ItemId, price: u64, now: DateTime<Utc>) -> DomainResult<()> {
        self.items
            .get_mut(&id)
            .ok_or(DomainError::NotFound)?
            .set_price(price, now);
        Ok(())
    }

    pub fn set_item_category(
        &mut self,
        id: ItemId,
        category: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.items
            .get_mut(&id)
            .ok_or(DomainError::NotFound)?
            .set_category(category, now);
        Ok(())
    }

    pub fn set_item_tax_rate(
        &mut self,
        id: ItemId,
        tax_rate_bps: u16,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.items
            .get_mut(&id)
            .ok_or(DomainError::NotFound)?
            .set_tax_rate_bps(tax_rate_bps, now);
        Ok(())
    }

    /// Mark an item as (un)available at a location.
    pub fn set_item_availability(
        &mut self,
        id: ItemId,
        location_id: LocationId,
        available: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if !self.locations.contains_key(&location_id) {
            return Err(DomainError::validation("unknown location"));
        }
        self.items
            .get_mut(&id)
            .ok_or(DomainError::NotFound)?
            .set_availability(location_id, available, now);
        Ok(())
    }

    /// Delete an item. Existing orders keep their snapshots; movements for
    /// the item stay in the log and cancel without stock effect.
    pub fn delete_item(&mut self, id: ItemId) -> DomainResult<Item> {
        tracing::info!(item_id = %id, "deleting item");
        self.items.remove(&id).ok_or(DomainError::NotFound)
    }

    // ---- stock ----

    /// Current stock for an item at a location (missing entries read as 0).
    pub fn available_stock(&self, id: ItemId, location_id: LocationId) -> DomainResult<i64> {
        Ok(self
            .items
            .get(&id)
            .ok_or(DomainError::NotFound)?
            .stock_at(location_id))
    }

    /// Unconditionally apply `delta` to one item/location stock level.
    /// No floor at zero and no movement logged.
    pub fn update_stock(
        &mut self,
        id: ItemId,
        location_id: LocationId,
        delta: i64,
    ) -> DomainResult<i64> {
        let level = self.ledger().update_stock(id, location_id, delta)?;
        tracing::info!(item_id = %id, location_id = %location_id, delta, level, "stock updated");
        Ok(level)
    }

    /// Record a manual stock movement (delivery, spoilage, correction).
    pub fn record_stock_movement(
        &mut self,
        id: ItemId,
        location_id: LocationId,
        quantity: i64,
        kind: MovementKind,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<MovementId> {
        let movement_id = self
            .ledger()
            .record_movement(id, location_id, quantity, kind, reason, now)?;
        tracing::info!(movement_id = %movement_id, item_id = %id, quantity, "stock movement recorded");
        Ok(movement_id)
    }

    /// Cancel a stock movement: remove it from the log and reverse its
    /// effect. Silently a no-op for unknown ids.
    pub fn cancel_stock_movement(&mut self, movement_id: MovementId) {
        tracing::info!(movement_id = %movement_id, "cancelling stock movement");
        self.ledger().cancel_movement(movement_id);
    }

    // ---- orders ----

    /// Create an order: snapshot the requested items, reserve stock once,
    /// store the order in `Pending`.
    ///
    /// This is the only place stock sufficiency is checked (the cart-level
    /// check); the ledger itself never refuses.
    pub fn create_order(
        &mut self,
        requests: &[(ItemId, i64)],
        location_id: LocationId,
        customer_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<OrderId> {
        if !self.locations.contains_key(&location_id) {
            return Err(DomainError::validation("unknown location"));
        }

        let mut lines = Vec::with_capacity(requests.len());
        for &(item_id, quantity) in requests {
            let item = self.items.get(&item_id).ok_or(DomainError::NotFound)?;
            if !item.is_available_at(location_id) {
                return Err(DomainError::validation(format!(
                    "item not available at this location: {}",
                    item.name()
                )));
            }
            if quantity > item.stock_at(location_id) {
                return Err(DomainError::validation(format!(
                    "insufficient stock for {}: requested {}, available {}",
                    item.name(),
                    quantity,
                    item.stock_at(location_id)
                )));
            }
            lines.push(OrderLine::snapshot(item, quantity)?);
        }

        let order_id = OrderId::new(EntityId::new());
        let order = Order::new(order_id, lines, location_id, customer_name, now)?;

        let stock_lines: Vec<StockLine> = order
            .lines()
            .iter()
            .map(|l| StockLine { item_id: l.item_id, quantity: l.quantity })
            .collect();
        self.ledger().reserve(&stock_lines, location_id, now);

        tracing::info!(
            order_id = %order_id,
            customer = order.customer_name(),
            total = order.total_amount(),
            "order created"
        );
        self.orders.insert(order_id, order);
        Ok(order_id)
    }

    /// Move an order to a new status and execute the implied ledger effect.
    ///
    /// `Pending -> Processing` reserves a second time (creation already
    /// reserved once); this mirrors the original behavior and is flagged in
    /// DESIGN.md rather than silently changed.
    pub fn set_order_status(
        &mut self,
        order_id: OrderId,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let order = self.orders.get_mut(&order_id).ok_or(DomainError::NotFound)?;
        let effect = order.transition_to(status, now)?;
        let location_id = order.location_id();
        let stock_lines: Vec<StockLine> = order
            .lines()
            .iter()
            .map(|l| StockLine { item_id: l.item_id, quantity: l.quantity })
            .collect();

        let mut ledger = StockLedger::new(&mut self.items, &mut self.movements);
        match effect {
            LedgerEffect::Reserve => {
                ledger.reserve(&stock_lines, location_id, now);
            }
            LedgerEffect::Release => {
                ledger.release(&stock_lines, location_id, now);
            }
            LedgerEffect::None => {}
        }
        tracing::info!(order_id = %order_id, ?status, ?effect, "order status changed");
        Ok(())
    }

    // ---- derived views ----

    /// Total order amount per customer name.
    pub fn order_totals_by_customer(&self) -> BTreeMap<String, u64> {
        let mut totals = BTreeMap::new();
        for order in self.orders.values() {
            *totals.entry(order.customer_name().to_string()).or_insert(0) +=
                order.total_amount();
        }
        totals
    }

    /// Orders in a given status, newest first.
    pub fn orders_with_status(&self, status: OrderStatus) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self
            .orders
            .values()
            .filter(|o| o.status() == status)
            .collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoplite_ledger::{REASON_CANCELLATION, REASON_RESERVATION};

    struct Fixture {
        state: ShopState,
        item: ItemId,
        location: LocationId,
    }

    /// One item, one location, availability set, stock seeded to `stock`.
    fn fixture(stock: i64) -> Fixture {
        let now = Utc::now();
        let mut state = ShopState::new();
        let location = state.add_location("Main Street").unwrap();
        let item = state.create_item("Chicken Curry", "mains", 950, 0, now).unwrap();
        state.set_item_availability(item, location, true, now).unwrap();
        state.update_stock(item, location, stock).unwrap();
        Fixture { state, item, location }
    }

    #[test]
    fn order_lifecycle_reserves_twice_then_releases_once() {
        // Stock 10, order qty 3.
        let Fixture { mut state, item, location } = fixture(10);
        let now = Utc::now();

        let order_id = state
            .create_order(&[(item, 3)], location, "Tanaka", now)
            .unwrap();
        assert_eq!(state.available_stock(item, location).unwrap(), 7);
        let decreases = state
            .movements()
            .iter()
            .filter(|m| m.reason() == REASON_RESERVATION)
            .count();
        assert_eq!(decreases, 1);

        // Pending -> Processing reserves a second time.
        state.set_order_status(order_id, OrderStatus::Processing, now).unwrap();
        assert_eq!(state.available_stock(item, location).unwrap(), 4);
        let decreases = state
            .movements()
            .iter()
            .filter(|m| m.reason() == REASON_RESERVATION)
            .count();
        assert_eq!(decreases, 2);

        // Processing -> Cancelled releases once.
        state.set_order_status(order_id, OrderStatus::Cancelled, now).unwrap();
        assert_eq!(state.available_stock(item, location).unwrap(), 7);
        let increases = state
            .movements()
            .iter()
            .filter(|m| m.reason() == REASON_CANCELLATION)
            .count();
        assert_eq!(increases, 1);
    }

    #[test]
    fn completing_an_order_has_no_ledger_effect() {
        let Fixture { mut state, item, location } = fixture(10);
        let now = Utc::now();
        let order_id = state.create_order(&[(item, 3)], location, "Tanaka", now).unwrap();

        state.set_order_status(order_id, OrderStatus::Processing, now).unwrap();
        assert_eq!(state.available_stock(item, location).unwrap(), 4);

        state.set_order_status(order_id, OrderStatus::Completed, now).unwrap();
        assert_eq!(state.available_stock(item, location).unwrap(), 4);
        assert_eq!(state.order(order_id).unwrap().status(), OrderStatus::Completed);
    }

    #[test]
    fn create_order_rejects_insufficient_stock() {
        let Fixture { mut state, item, location } = fixture(2);
        let err = state
            .create_order(&[(item, 3)], location, "Tanaka", Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        // Nothing was reserved.
        assert_eq!(state.available_stock(item, location).unwrap(), 2);
        assert!(state.movements().is_empty());
    }

    #[test]
    fn create_order_rejects_unavailable_location() {
        let Fixture { mut state, item, .. } = fixture(10);
        let other = state.add_location("Harbor Kiosk").unwrap();
        // Item was never made available at the new location.
        let err = state
            .create_order(&[(item, 1)], other, "Tanaka", Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let unknown = LocationId::new(EntityId::new());
        let err = state
            .create_order(&[(item, 1)], unknown, "Tanaka", Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_stock_is_permissive() {
        let Fixture { mut state, item, location } = fixture(2);
        assert_eq!(state.update_stock(item, location, -5).unwrap(), -2);
    }

    #[test]
    fn manual_movement_and_cancellation_round_trip() {
        let Fixture { mut state, item, location } = fixture(6);
        let movement_id = state
            .record_stock_movement(item, location, 4, MovementKind::Decrease, "Spoilage", Utc::now())
            .unwrap();
        assert_eq!(state.available_stock(item, location).unwrap(), 2);

        state.cancel_stock_movement(movement_id);
        assert_eq!(state.available_stock(item, location).unwrap(), 6);
        assert!(state.movements().iter().all(|m| m.id_typed() != movement_id));

        // Second cancel: no-op, no double reverse.
        state.cancel_stock_movement(movement_id);
        assert_eq!(state.available_stock(item, location).unwrap(), 6);
    }

    #[test]
    fn deleted_item_degrades_silently() {
        let Fixture { mut state, item, location } = fixture(10);
        let now = Utc::now();
        let order_id = state.create_order(&[(item, 2)], location, "Tanaka", now).unwrap();
        let movement_id = state.movements()[0].id_typed();

        state.delete_item(item).unwrap();

        // Order snapshot survives the deletion.
        assert_eq!(state.order(order_id).unwrap().lines()[0].name, "Chicken Curry");

        // Status change still works; the reserve lines just skip the item.
        state.set_order_status(order_id, OrderStatus::Processing, now).unwrap();

        // Cancelling the old movement removes it without a stock effect.
        state.cancel_stock_movement(movement_id);
        assert!(state.movements().iter().all(|m| m.id_typed() != movement_id));
    }

    #[test]
    fn order_totals_by_customer_sums_orders() {
        let Fixture { mut state, item, location } = fixture(100);
        let now = Utc::now();
        state.create_order(&[(item, 2)], location, "Tanaka", now).unwrap();
        state.create_order(&[(item, 1)], location, "Tanaka", now).unwrap();
        state.create_order(&[(item, 4)], location, "Mori", now).unwrap();

        let totals = state.order_totals_by_customer();
        assert_eq!(totals["Tanaka"], 950 * 3);
        assert_eq!(totals["Mori"], 950 * 4);
    }

    #[test]
    fn orders_with_status_filters() {
        let Fixture { mut state, item, location } = fixture(100);
        let now = Utc::now();
        let a = state.create_order(&[(item, 1)], location, "Tanaka", now).unwrap();
        let _b = state.create_order(&[(item, 1)], location, "Mori", now).unwrap();
        state.set_order_status(a, OrderStatus::Processing, now).unwrap();

        assert_eq!(state.orders_with_status(OrderStatus::Pending).len(), 1);
        assert_eq!(state.orders_with_status(OrderStatus::Processing).len(), 1);
        assert_eq!(state.orders_with_status(OrderStatus::Completed).len(), 0);
    }

    #[test]
    fn stock_reconciles_after_order_lifecycle() {
        let Fixture { mut state, item, location } = fixture(10);
        let now = Utc::now();
        let order_id = state.create_order(&[(item, 3)], location, "Tanaka", now).unwrap();
        state.set_order_status(order_id, OrderStatus::Processing, now).unwrap();
        state.set_order_status(order_id, OrderStatus::Cancelled, now).unwrap();

        let balance = state.ledger().logged_balance(item, location);
        assert_eq!(state.available_stock(item, location).unwrap(), 10 + balance);
    }
}
