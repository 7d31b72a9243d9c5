//! Stock ledger: per-location stock counters plus the movement log.
//!
//! The ledger is the combination of `Item.stock` maps (owned by the catalog)
//! and an append-style `StockMovement` log. Operations here keep the two in
//! step for order reservations, releases, manual movements, and movement
//! cancellation.
//!
//! Deliberately permissive: no floor at zero, no batch atomicity, silent
//! no-ops for unknown references. Stock sufficiency is a caller-side check
//! (order creation), never enforced here.

pub mod movement;
pub mod ops;

pub use movement::{MovementId, MovementKind, StockLine, StockMovement};
pub use ops::{StockLedger, REASON_CANCELLATION, REASON_RESERVATION};
