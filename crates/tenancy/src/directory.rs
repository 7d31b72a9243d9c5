use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_core::{DomainError, DomainResult, TenantId};

use crate::selection::SelectionState;
use crate::tenant::{Tenant, TenantStatus};

/// Cross-tenant registry plus the session's selection state.
///
/// This is the content of the global persisted blob: everything that is not
/// scoped to one tenant's shop data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDirectory {
    tenants: BTreeMap<TenantId, Tenant>,
    selection: SelectionState,
}

impl TenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    pub fn get(&self, tenant_id: TenantId) -> Option<&Tenant> {
        self.tenants.get(&tenant_id)
    }

    pub fn list(&self) -> impl Iterator<Item = &Tenant> {
        self.tenants.values()
    }

    pub fn list_by_status(&self, status: TenantStatus) -> Vec<&Tenant> {
        self.tenants.values().filter(|t| t.status() == status).collect()
    }

    /// Register a new tenant (onboarding). Rejects duplicate shop names.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        shop_name: impl Into<String>,
        contact_email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<TenantId> {
        let shop_name = shop_name.into();
        if self
            .tenants
            .values()
            .any(|t| t.shop_name().eq_ignore_ascii_case(&shop_name))
        {
            return Err(DomainError::conflict(format!(
                "shop name already registered: {shop_name}"
            )));
        }
        let tenant = Tenant::register(TenantId::new(), name, shop_name, contact_email, now)?;
        let id = tenant.id_typed();
        self.tenants.insert(id, tenant);
        Ok(id)
    }

    pub fn activate(&mut self, tenant_id: TenantId) -> DomainResult<()> {
        self.tenants
            .get_mut(&tenant_id)
            .ok_or(DomainError::NotFound)?
            .activate()
    }

    pub fn suspend(&mut self, tenant_id: TenantId) -> DomainResult<()> {
        self.tenants
            .get_mut(&tenant_id)
            .ok_or(DomainError::NotFound)?
            .suspend()
    }

    /// Remove a tenant from the registry. The per-tenant shop blob is the
    /// caller's to clean up.
    pub fn remove(&mut self, tenant_id: TenantId) -> DomainResult<Tenant> {
        self.tenants.remove(&tenant_id).ok_or(DomainError::NotFound)
    }
}
