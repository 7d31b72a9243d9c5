use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_catalog::{Item, ItemId, LocationId};
use shoplite_core::{DomainError, DomainResult, Entity, EntityId, ValueObject};

use crate::status::{LedgerEffect, OrderStatus};

/// Order identifier (tenant-scoped: stored inside one tenant's shop state).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order line: denormalized item snapshot plus quantity.
///
/// The snapshot is taken at order creation so later catalog edits (price,
/// name) never change what the customer agreed to. The item may even be
/// deleted afterwards; the line stands on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    /// Unit price in smallest currency unit at time of ordering.
    pub unit_price: u64,
    /// Tax rate in basis points at time of ordering.
    pub tax_rate_bps: u16,
    pub quantity: i64,
}

impl OrderLine {
    /// Snapshot an item into a line.
    pub fn snapshot(item: &Item, quantity: i64) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("line quantity must be positive"));
        }
        Ok(Self {
            item_id: item.id_typed(),
            name: item.name().to_string(),
            unit_price: item.price(),
            tax_rate_bps: item.tax_rate_bps(),
            quantity,
        })
    }

    /// Line total including tax, in smallest currency unit (truncating).
    pub fn total(&self) -> u64 {
        let net = self.unit_price * self.quantity as u64;
        net + net * self.tax_rate_bps as u64 / 10_000
    }
}

impl ValueObject for OrderLine {}

/// A customer order at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    lines: Vec<OrderLine>,
    status: OrderStatus,
    location_id: LocationId,
    /// Sum of line totals, computed once at creation.
    total_amount: u64,
    customer_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order in `Pending` status.
    ///
    /// The caller is responsible for the one-time stock reservation that
    /// accompanies creation; this constructor only builds the record.
    pub fn new(
        id: OrderId,
        lines: Vec<OrderLine>,
        location_id: LocationId,
        customer_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation("order must have at least one line"));
        }
        let customer_name = customer_name.into();
        if customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        let total_amount = lines.iter().map(OrderLine::total).sum();
        Ok(Self {
            id,
            lines,
            status: OrderStatus::Pending,
            location_id,
            total_amount,
            customer_name,
            created_at,
            updated_at: created_at,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn location_id(&self) -> LocationId {
        self.location_id
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Move the order to `to`, returning the implied ledger effect.
    ///
    /// The effect is *not* executed here; the application layer runs it
    /// against the stock ledger with this order's lines and location.
    pub fn transition_to(
        &mut self,
        to: OrderStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<LedgerEffect> {
        let effect = self.status.transition(to)?;
        self.status = to;
        self.updated_at = now;
        Ok(effect)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoplite_catalog::Item;

    fn test_item(price: u64, tax_bps: u16) -> Item {
        Item::new(
            ItemId::new(EntityId::new()),
            "Daily Special",
            "mains",
            price,
            tax_bps,
            Utc::now(),
        )
        .unwrap()
    }

    fn test_location() -> LocationId {
        LocationId::new(EntityId::new())
    }

    #[test]
    fn snapshot_rejects_non_positive_quantity() {
        let item = test_item(500, 0);
        let err = OrderLine::snapshot(&item, 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn line_total_includes_tax() {
        let item = test_item(1000, 800); // 8% tax
        let line = OrderLine::snapshot(&item, 3).unwrap();
        assert_eq!(line.total(), 3240);
    }

    #[test]
    fn order_total_sums_lines() {
        let loc = test_location();
        let lines = vec![
            OrderLine::snapshot(&test_item(500, 0), 2).unwrap(),
            OrderLine::snapshot(&test_item(250, 0), 4).unwrap(),
        ];
        let order = Order::new(OrderId::new(EntityId::new()), lines, loc, "Aoki", Utc::now())
            .unwrap();
        assert_eq!(order.total_amount(), 2000);
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn order_requires_lines_and_customer() {
        let loc = test_location();
        let err = Order::new(OrderId::new(EntityId::new()), vec![], loc, "Aoki", Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let lines = vec![OrderLine::snapshot(&test_item(500, 0), 1).unwrap()];
        let err = Order::new(OrderId::new(EntityId::new()), lines, loc, "  ", Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn transition_updates_status_and_returns_effect() {
        let loc = test_location();
        let lines = vec![OrderLine::snapshot(&test_item(500, 0), 1).unwrap()];
        let mut order =
            Order::new(OrderId::new(EntityId::new()), lines, loc, "Aoki", Utc::now()).unwrap();

        let effect = order.transition_to(OrderStatus::Processing, Utc::now()).unwrap();
        assert_eq!(effect, LedgerEffect::Reserve);
        assert_eq!(order.status(), OrderStatus::Processing);

        let effect = order.transition_to(OrderStatus::Cancelled, Utc::now()).unwrap();
        assert_eq!(effect, LedgerEffect::Release);
        assert_eq!(order.status(), OrderStatus::Cancelled);

        // Terminal: nothing further.
        let err = order.transition_to(OrderStatus::Pending, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}
