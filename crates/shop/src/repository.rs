use anyhow::Context;

use shoplite_core::TenantId;
use shoplite_store::{BlobStore, Keyspace};
use shoplite_tenancy::TenantDirectory;

use crate::state::ShopState;

/// Couples the two persisted blobs to a [`BlobStore`].
///
/// Load on startup, save after every successful command — the caller drives
/// that policy; this type only knows the keys and the JSON encoding. Missing
/// blobs load as fresh defaults (first run).
#[derive(Debug)]
pub struct ShopRepository<S: BlobStore> {
    store: S,
    keyspace: Keyspace,
}

impl<S: BlobStore> ShopRepository<S> {
    pub fn new(store: S, keyspace: Keyspace) -> Self {
        Self { store, keyspace }
    }

    pub fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    /// Load the global blob (tenant registry + selection state).
    pub fn load_directory(&self) -> anyhow::Result<TenantDirectory> {
        let key = self.keyspace.global_key();
        Ok(self
            .store
            .load_json(&key)
            .with_context(|| format!("failed to load directory blob {key:?}"))?
            .unwrap_or_default())
    }

    pub fn save_directory(&self, directory: &TenantDirectory) -> anyhow::Result<()> {
        let key = self.keyspace.global_key();
        tracing::debug!(key = %key, "saving directory blob");
        self.store.save_json(&key, directory)
    }

    /// Load one tenant's shop blob.
    pub fn load_shop(&self, tenant_id: TenantId) -> anyhow::Result<ShopState> {
        let key = self.keyspace.shop_key(tenant_id);
        Ok(self
            .store
            .load_json(&key)
            .with_context(|| format!("failed to load shop blob {key:?}"))?
            .unwrap_or_default())
    }

    pub fn save_shop(&self, tenant_id: TenantId, state: &ShopState) -> anyhow::Result<()> {
        let key = self.keyspace.shop_key(tenant_id);
        tracing::debug!(key = %key, "saving shop blob");
        self.store.save_json(&key, state)
    }

    /// Delete one tenant's shop blob (tenant removal cleanup).
    pub fn remove_shop(&self, tenant_id: TenantId) -> anyhow::Result<()> {
        self.store.remove(&self.keyspace.shop_key(tenant_id))
    }
}
