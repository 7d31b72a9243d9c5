use shoplite_core::TenantId;

/// Key namespace for the two persisted blobs.
///
/// One global blob (tenant registry + selection state) and one shop blob per
/// tenant, all under a fixed prefix so unrelated data in the same store never
/// collides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    prefix: String,
}

impl Keyspace {
    pub const DEFAULT_PREFIX: &'static str = "shoplite";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key of the global blob (cross-tenant state).
    pub fn global_key(&self) -> String {
        format!("{}:global", self.prefix)
    }

    /// Key of one tenant's shop blob.
    pub fn shop_key(&self, tenant_id: TenantId) -> String {
        format!("{}:shop:{}", self.prefix, tenant_id)
    }
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}
