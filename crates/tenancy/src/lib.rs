//! Tenancy domain module: tenant onboarding/administration, roles, and the
//! cross-tenant selection state.
//!
//! One tenant = one shop. Registration produces a pending tenant; a platform
//! administrator activates or suspends it. The selection state records which
//! tenant/user/role the current session is acting as and is persisted in the
//! global blob alongside the tenant registry.

pub mod directory;
pub mod role;
pub mod selection;
pub mod tenant;

pub use directory::TenantDirectory;
pub use role::Role;
pub use selection::SelectionState;
pub use tenant::{Tenant, TenantStatus};
