use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_core::{DomainError, DomainResult, Entity, EntityId};

use crate::location::LocationId;

/// Item identifier (tenant-scoped: stored inside one tenant's shop state).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub EntityId);

impl ItemId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A sellable item with per-location stock levels.
///
/// Stock is non-negative by convention only: nothing in this type clamps it.
/// The ledger operations apply signed deltas and the map holds whatever they
/// produce, including negative levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    category: String,
    /// Price in smallest currency unit (e.g., cents).
    price: u64,
    /// Tax rate in basis points (10% = 1000).
    tax_rate_bps: u16,
    stock: BTreeMap<LocationId, i64>,
    available_locations: BTreeSet<LocationId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: u64,
        tax_rate_bps: u16,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            category: category.into(),
            price,
            tax_rate_bps,
            stock: BTreeMap::new(),
            available_locations: BTreeSet::new(),
            created_at,
            updated_at: created_at,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn tax_rate_bps(&self) -> u16 {
        self.tax_rate_bps
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Current stock level at a location. Missing entries read as 0.
    pub fn stock_at(&self, location_id: LocationId) -> i64 {
        self.stock.get(&location_id).copied().unwrap_or(0)
    }

    pub fn stock(&self) -> &BTreeMap<LocationId, i64> {
        &self.stock
    }

    /// Apply a signed delta to the stock level at a location.
    ///
    /// Missing entries are treated as 0. No floor at zero: callers that want
    /// a non-negative guarantee must check before calling.
    pub fn apply_stock_delta(&mut self, location_id: LocationId, delta: i64) -> i64 {
        let level = self.stock.entry(location_id).or_insert(0);
        *level += delta;
        *level
    }

    pub fn is_available_at(&self, location_id: LocationId) -> bool {
        self.available_locations.contains(&location_id)
    }

    pub fn available_locations(&self) -> &BTreeSet<LocationId> {
        &self.available_locations
    }

    pub fn set_availability(&mut self, location_id: LocationId, available: bool, now: DateTime<Utc>) {
        if available {
            self.available_locations.insert(location_id);
        } else {
            self.available_locations.remove(&location_id);
        }
        self.updated_at = now;
    }

    pub fn rename(&mut self, name: impl Into<String>, now: DateTime<Utc>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        self.name = name;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_category(&mut self, category: impl Into<String>, now: DateTime<Utc>) {
        self.category = category.into();
        self.updated_at = now;
    }

    pub fn set_price(&mut self, price: u64, now: DateTime<Utc>) {
        self.price = price;
        self.updated_at = now;
    }

    pub fn set_tax_rate_bps(&mut self, tax_rate_bps: u16, now: DateTime<Utc>) {
        self.tax_rate_bps = tax_rate_bps;
        self.updated_at = now;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
