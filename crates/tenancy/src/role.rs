use serde::{Deserialize, Serialize};

/// Role the current session acts as.
///
/// `SuperAdmin` administers tenants platform-wide; `ShopAdmin` manages one
/// shop; `Staff` works the day-to-day screens. Permission mapping beyond
/// tenant administration is a caller concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    ShopAdmin,
    Staff,
}

impl Role {
    pub fn can_administer_tenants(self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::ShopAdmin => "shop_admin",
            Role::Staff => "staff",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
