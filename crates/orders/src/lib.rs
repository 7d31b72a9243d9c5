//! Order domain module: orders, line snapshots, and the status lifecycle.
//!
//! The status machine is pure: transitions return the ledger effect they
//! imply (reserve/release/none) and the application layer executes it. The
//! order itself never touches stock.

pub mod order;
pub mod status;

pub use order::{Order, OrderId, OrderLine};
pub use status::{LedgerEffect, OrderStatus};
