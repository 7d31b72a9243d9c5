//! Catalog domain module: items and the locations they are sold at.
//!
//! Pure domain logic (no IO, no HTTP, no storage). Stock levels live on the
//! item as a per-location map; movement bookkeeping is done by the ledger
//! crate on top of these maps.

pub mod item;
pub mod location;

pub use item::{Item, ItemId};
pub use location::{Location, LocationId};
