use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key-value blob store abstraction.
///
/// Values are opaque strings (JSON in practice). Implementations must treat
/// `save` as a full overwrite; there is no partial update.
pub trait BlobStore: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
    fn keys(&self) -> anyhow::Result<Vec<String>>;

    /// Load and deserialize a JSON blob. `None` when the key is absent.
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        Self: Sized,
    {
        match self.load(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("failed to deserialize blob {key:?}"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and save a JSON blob.
    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize blob {key:?}"))?;
        self.save(key, &raw)
    }
}

impl<S> BlobStore for Arc<S>
where
    S: BlobStore + ?Sized,
{
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> anyhow::Result<Vec<String>> {
        (**self).keys()
    }
}

/// In-memory blob store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let map = self
            .inner
            .read()
            .map_err(|_| anyhow::anyhow!("blob store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| anyhow::anyhow!("blob store lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| anyhow::anyhow!("blob store lock poisoned"))?;
        map.remove(key);
        Ok(())
    }

    fn keys(&self) -> anyhow::Result<Vec<String>> {
        let map = self
            .inner
            .read()
            .map_err(|_| anyhow::anyhow!("blob store lock poisoned"))?;
        Ok(map.keys().cloned().collect())
    }
}

/// File-backed blob store: one JSON file per key under a root directory.
///
/// Keys are mapped to file names reversibly (`:` becomes `@`), so `keys()`
/// can reconstruct the original keys from directory entries.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

const KEY_SEPARATOR: char = ':';
const FILE_SEPARATOR: char = '@';
const FILE_EXTENSION: &str = "json";

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create blob store directory {root:?}"))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name = key.replace(KEY_SEPARATOR, &FILE_SEPARATOR.to_string());
        self.root.join(format!("{name}.{FILE_EXTENSION}"))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read blob {path:?}")),
        }
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write blob {path:?}"))
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove blob {path:?}")),
        }
    }

    fn keys(&self) -> anyhow::Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to list blob store directory {:?}", self.root))?;
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.context("failed to read blob store directory entry")?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.replace(FILE_SEPARATOR, &KEY_SEPARATOR.to_string()));
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_round_trip() {
        let store = InMemoryBlobStore::new();
        assert!(store.load("k").unwrap().is_none());

        store.save("k", "v1").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v1"));

        store.save("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert!(store.load("k").unwrap().is_none());
    }

    #[test]
    fn file_store_round_trip_and_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();

        store.save("shoplite:global", "{}").unwrap();
        store.save("shoplite:shop:abc", "{\"items\":{}}").unwrap();

        assert_eq!(store.load("shoplite:global").unwrap().as_deref(), Some("{}"));
        assert_eq!(
            store.keys().unwrap(),
            vec!["shoplite:global".to_string(), "shoplite:shop:abc".to_string()]
        );

        store.remove("shoplite:global").unwrap();
        assert!(store.load("shoplite:global").unwrap().is_none());
        // Removing a missing key stays quiet.
        store.remove("shoplite:global").unwrap();
    }

    #[test]
    fn json_helpers_round_trip() {
        let store = InMemoryBlobStore::new();
        let value = vec![1u32, 2, 3];
        store.save_json("nums", &value).unwrap();
        let loaded: Vec<u32> = store.load_json("nums").unwrap().unwrap();
        assert_eq!(loaded, value);
    }

    #[test]
    fn malformed_blob_surfaces_an_error() {
        let store = InMemoryBlobStore::new();
        store.save("bad", "not json").unwrap();
        let result: anyhow::Result<Option<Vec<u32>>> = store.load_json("bad");
        assert!(result.is_err());
    }
}
