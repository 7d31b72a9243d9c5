use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_catalog::{ItemId, LocationId};
use shoplite_core::{DomainError, DomainResult, Entity, EntityId};

/// Stock movement identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(pub EntityId);

impl MovementId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for MovementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Increase,
    Decrease,
}

/// One line of a reservation/release batch: which item, how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    pub item_id: ItemId,
    pub quantity: i64,
}

impl shoplite_core::ValueObject for StockLine {}

/// A log entry recording one stock change at one location.
///
/// Quantity is always positive; the direction is carried by `kind`.
/// Cancelling a movement removes the entry and reverses its signed effect on
/// the owning item's stock for that location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    id: MovementId,
    item_id: ItemId,
    location_id: LocationId,
    quantity: i64,
    kind: MovementKind,
    reason: String,
    occurred_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn new(
        id: MovementId,
        item_id: ItemId,
        location_id: LocationId,
        quantity: i64,
        kind: MovementKind,
        reason: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("movement quantity must be positive"));
        }
        Ok(Self {
            id,
            item_id,
            location_id,
            quantity,
            kind,
            reason: reason.into(),
            occurred_at,
        })
    }

    pub fn id_typed(&self) -> MovementId {
        self.id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn location_id(&self) -> LocationId {
        self.location_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// The movement's effect on stock: positive for increases, negative for
    /// decreases.
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            MovementKind::Increase => self.quantity,
            MovementKind::Decrease => -self.quantity,
        }
    }
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
