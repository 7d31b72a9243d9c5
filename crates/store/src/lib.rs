//! Local blob persistence for shop state.
//!
//! The persistence model mirrors a per-session key-value store: independent
//! JSON blobs under namespaced keys, read on load, written on every
//! mutation. There is no locking and no reconciliation between divergent
//! copies; each session owns its files.

pub mod blob;
pub mod keyspace;

pub use blob::{BlobStore, FileBlobStore, InMemoryBlobStore};
pub use keyspace::Keyspace;
