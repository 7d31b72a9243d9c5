//! Application layer: per-tenant shop state and the command surface.
//!
//! `ShopState` is the explicit, passed-in state object — items, locations,
//! orders, the movement log, and settings for one tenant. Every mutation goes
//! through a command method; there are no ambient singletons. The repository
//! couples the state to the persisted blobs.

pub mod commands;
pub mod repository;
pub mod settings;
pub mod state;

pub use repository::ShopRepository;
pub use settings::{PaymentMethod, ShippingMethod, ShopSettings};
pub use state::ShopState;
