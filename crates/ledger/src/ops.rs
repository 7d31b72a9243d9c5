use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use shoplite_catalog::{Item, ItemId, LocationId};
use shoplite_core::{DomainError, DomainResult, EntityId};

use crate::movement::{MovementId, MovementKind, StockLine, StockMovement};

/// Reason recorded on movements created by order reservation.
pub const REASON_RESERVATION: &str = "Order reservation";

/// Reason recorded on movements created by order cancellation.
pub const REASON_CANCELLATION: &str = "Order cancellation";

/// Mutable view over one tenant's stock counters and movement log.
///
/// Borrowed from the shop state for the duration of one operation; every
/// mutation goes through here so the counters and the log move together.
#[derive(Debug)]
pub struct StockLedger<'a> {
    items: &'a mut BTreeMap<ItemId, Item>,
    movements: &'a mut Vec<StockMovement>,
}

impl<'a> StockLedger<'a> {
    pub fn new(
        items: &'a mut BTreeMap<ItemId, Item>,
        movements: &'a mut Vec<StockMovement>,
    ) -> Self {
        Self { items, movements }
    }

    /// Reserve stock for a batch of order lines at one location.
    ///
    /// Per line: decrement the item's stock at the location and append a
    /// `Decrease` movement with reason "Order reservation". There is no
    /// atomicity across the batch — a later line is still applied even if an
    /// earlier one drove stock negative. Lines referencing a missing item
    /// are skipped silently.
    pub fn reserve(
        &mut self,
        lines: &[StockLine],
        location_id: LocationId,
        occurred_at: DateTime<Utc>,
    ) -> Vec<MovementId> {
        self.apply_batch(lines, location_id, MovementKind::Decrease, REASON_RESERVATION, occurred_at)
    }

    /// Release previously reserved stock: mirror of [`StockLedger::reserve`].
    ///
    /// Increments stock and appends `Increase` movements with reason
    /// "Order cancellation".
    pub fn release(
        &mut self,
        lines: &[StockLine],
        location_id: LocationId,
        occurred_at: DateTime<Utc>,
    ) -> Vec<MovementId> {
        self.apply_batch(lines, location_id, MovementKind::Increase, REASON_CANCELLATION, occurred_at)
    }

    fn apply_batch(
        &mut self,
        lines: &[StockLine],
        location_id: LocationId,
        kind: MovementKind,
        reason: &str,
        occurred_at: DateTime<Utc>,
    ) -> Vec<MovementId> {
        let mut appended = Vec::with_capacity(lines.len());
        for line in lines {
            let Some(item) = self.items.get_mut(&line.item_id) else {
                tracing::warn!(item_id = %line.item_id, "skipping stock line for unknown item");
                continue;
            };
            let movement = match StockMovement::new(
                MovementId::new(EntityId::new()),
                line.item_id,
                location_id,
                line.quantity,
                kind,
                reason,
                occurred_at,
            ) {
                Ok(m) => m,
                Err(_) => {
                    tracing::warn!(
                        item_id = %line.item_id,
                        quantity = line.quantity,
                        "skipping stock line with non-positive quantity"
                    );
                    continue;
                }
            };
            item.apply_stock_delta(location_id, movement.signed_quantity());
            appended.push(movement.id_typed());
            self.movements.push(movement);
        }
        appended
    }

    /// Record a single manual movement and apply its effect.
    pub fn record_movement(
        &mut self,
        item_id: ItemId,
        location_id: LocationId,
        quantity: i64,
        kind: MovementKind,
        reason: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<MovementId> {
        if !self.items.contains_key(&item_id) {
            return Err(DomainError::not_found());
        }
        let movement = StockMovement::new(
            MovementId::new(EntityId::new()),
            item_id,
            location_id,
            quantity,
            kind,
            reason,
            occurred_at,
        )?;
        let id = movement.id_typed();
        if let Some(item) = self.items.get_mut(&item_id) {
            item.apply_stock_delta(location_id, movement.signed_quantity());
        }
        self.movements.push(movement);
        Ok(id)
    }

    /// Cancel a movement: remove it from the log and reverse its signed
    /// effect on the owning item/location.
    ///
    /// Silently a no-op when the id is unknown — which also makes a second
    /// cancellation of the same id a no-op, never a double reverse. A
    /// movement whose item has since been deleted is removed from the log
    /// without any stock effect.
    pub fn cancel_movement(&mut self, movement_id: MovementId) {
        let Some(pos) = self
            .movements
            .iter()
            .position(|m| m.id_typed() == movement_id)
        else {
            return;
        };
        let movement = self.movements.remove(pos);
        match self.items.get_mut(&movement.item_id()) {
            Some(item) => {
                item.apply_stock_delta(movement.location_id(), -movement.signed_quantity());
            }
            None => {
                tracing::warn!(
                    movement_id = %movement_id,
                    item_id = %movement.item_id(),
                    "cancelled movement references a missing item; no stock effect"
                );
            }
        }
    }

    /// Unconditionally apply `delta` to one item/location stock level.
    ///
    /// Missing entries are treated as 0 and there is no floor at zero.
    /// Returns the new level, or `NotFound` when the item does not exist.
    /// Does not log a movement: callers wanting an audit entry use
    /// [`StockLedger::record_movement`].
    pub fn update_stock(
        &mut self,
        item_id: ItemId,
        location_id: LocationId,
        delta: i64,
    ) -> DomainResult<i64> {
        let item = self.items.get_mut(&item_id).ok_or(DomainError::NotFound)?;
        Ok(item.apply_stock_delta(location_id, delta))
    }

    /// Signed sum of all movements still in the log for one item/location.
    ///
    /// With an initial stock level of `s`, the counters and log agree when
    /// `stock_at(location) == s + logged_balance(...)`.
    pub fn logged_balance(&self, item_id: ItemId, location_id: LocationId) -> i64 {
        self.movements
            .iter()
            .filter(|m| m.item_id() == item_id && m.location_id() == location_id)
            .map(|m| m.signed_quantity())
            .sum()
    }
}
