use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoplite_core::{DomainError, DomainResult, Entity, TenantId};

/// Tenant status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Pending,
    Active,
    Suspended,
}

/// A registered tenant: one shop on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    id: TenantId,
    name: String,
    shop_name: String,
    contact_email: String,
    status: TenantStatus,
    created_at: DateTime<Utc>,
}

impl Tenant {
    /// Register a new tenant. Starts `Pending` until an administrator
    /// activates it.
    pub fn register(
        id: TenantId,
        name: impl Into<String>,
        shop_name: impl Into<String>,
        contact_email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let shop_name = shop_name.into();
        let contact_email = contact_email.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("tenant name cannot be empty"));
        }
        if shop_name.trim().is_empty() {
            return Err(DomainError::validation("shop name cannot be empty"));
        }
        if !contact_email.contains('@') {
            return Err(DomainError::validation("contact email is malformed"));
        }
        Ok(Self {
            id,
            name,
            shop_name,
            contact_email,
            status: TenantStatus::Pending,
            created_at,
        })
    }

    pub fn id_typed(&self) -> TenantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    pub fn status(&self) -> TenantStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Invariant helper: whether this tenant's shop may transact.
    ///
    /// Pending and suspended tenants cannot transact.
    pub fn can_transact(&self) -> bool {
        self.status == TenantStatus::Active
    }

    /// Activate a pending or suspended tenant.
    pub fn activate(&mut self) -> DomainResult<()> {
        if self.status == TenantStatus::Active {
            return Err(DomainError::conflict("tenant is already active"));
        }
        self.status = TenantStatus::Active;
        Ok(())
    }

    /// Suspend an active tenant.
    pub fn suspend(&mut self) -> DomainResult<()> {
        if self.status != TenantStatus::Active {
            return Err(DomainError::invariant(
                "only active tenants can be suspended",
            ));
        }
        self.status = TenantStatus::Suspended;
        Ok(())
    }
}

impl Entity for Tenant {
    type Id = TenantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
