//! `openpos-store` — the local persistence store.
//!
//! Named collections are serialized wholesale as JSON blobs into a string
//! key-value backend: synchronous, single-process, last-write-wins. Two
//! stores over the same backing directory can race and silently overwrite
//! each other; nothing here coordinates across processes.

pub mod backend;
pub mod collection;
pub mod error;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use collection::Collection;
pub use error::StoreError;
pub use store::LocalStore;
