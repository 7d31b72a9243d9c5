use serde::{Deserialize, Serialize};

use shoplite_core::{TenantId, UserId};

use crate::role::Role;

/// Which tenant/user/role the current session is acting as.
///
/// Persisted in the global blob, independent of any tenant's shop data. Each
/// session holds its own copy; divergent copies are never reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    tenant_id: Option<TenantId>,
    user_id: Option<UserId>,
    role: Role,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            tenant_id: None,
            user_id: None,
            role: Role::Staff,
        }
    }
}

impl SelectionState {
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn select_tenant(&mut self, tenant_id: TenantId) {
        self.tenant_id = Some(tenant_id);
    }

    pub fn select_user(&mut self, user_id: UserId) {
        self.user_id = Some(user_id);
    }

    pub fn select_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Drop tenant/user selection and fall back to the default role.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
