//! Whole-collection CRUD over a storage backend.

use serde::Serialize;
use serde::de::DeserializeOwned;

use openpos_core::Entity;

use crate::backend::StorageBackend;
use crate::collection::{Collection, KEY_PREFIX};
use crate::error::StoreError;

/// Sentinel key marking a backing space as seeded.
fn sentinel_key() -> String {
    format!("{KEY_PREFIX}initialized")
}

/// The local persistence store.
///
/// Every operation is a whole-blob read-modify-write: collections are small
/// and the hosting model is single-user, so O(n) scans are the point, not a
/// problem. There is no locking; concurrent stores over one backend race
/// with last-write-wins.
#[derive(Debug)]
pub struct LocalStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> LocalStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Read a whole collection.
    ///
    /// An absent key and a malformed blob both yield the empty collection;
    /// malformed blobs are logged and otherwise ignored.
    pub fn get_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        let Some(blob) = self.backend.load(&collection.key())? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&blob) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(%collection, error = %e, "malformed collection blob, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite a whole collection. Last write wins.
    pub fn save_collection<T: Serialize>(
        &mut self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), StoreError> {
        let blob = serde_json::to_string(items)?;
        self.backend.store(&collection.key(), &blob)
    }

    /// Append one record.
    pub fn add_item<T>(&mut self, collection: Collection, item: T) -> Result<(), StoreError>
    where
        T: Entity + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.get_collection(collection)?;
        items.push(item);
        self.save_collection(collection, &items)
    }

    /// Replace the record sharing `item`'s id.
    ///
    /// Returns the stored record, or `None` when no record has that id
    /// (in which case the collection is untouched).
    pub fn update_item<T>(
        &mut self,
        collection: Collection,
        item: T,
    ) -> Result<Option<T>, StoreError>
    where
        T: Entity + Clone + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.get_collection(collection)?;
        let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) else {
            return Ok(None);
        };
        *slot = item.clone();
        self.save_collection(collection, &items)?;
        Ok(Some(item))
    }

    /// Remove the record with `id`.
    ///
    /// Returns `false` when no record has that id (collection untouched).
    pub fn delete_item<T>(
        &mut self,
        collection: Collection,
        id: &T::Id,
    ) -> Result<bool, StoreError>
    where
        T: Entity + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.get_collection(collection)?;
        let before = items.len();
        items.retain(|existing| existing.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save_collection(collection, &items)?;
        Ok(true)
    }

    /// Find one record by id.
    pub fn find_item<T>(&self, collection: Collection, id: &T::Id) -> Result<Option<T>, StoreError>
    where
        T: Entity + DeserializeOwned,
    {
        let items: Vec<T> = self.get_collection(collection)?;
        Ok(items.into_iter().find(|existing| existing.id() == id))
    }

    /// Run `seed` exactly once per backing space.
    ///
    /// The first call runs the closure and writes the sentinel key; later
    /// calls (including from freshly constructed stores over the same
    /// backend) are no-ops. Returns whether the seed ran.
    pub fn seed_once<F>(&mut self, seed: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Self) -> Result<(), StoreError>,
    {
        let sentinel = sentinel_key();
        if self.backend.load(&sentinel)?.is_some() {
            return Ok(false);
        }
        seed(self)?;
        self.backend.store(&sentinel, "true")?;
        tracing::info!("seeded initial collections");
        Ok(true)
    }

    /// Drop a whole collection (used by cart clearing).
    pub fn clear_collection(&mut self, collection: Collection) -> Result<(), StoreError> {
        self.backend.remove(&collection.key())
    }
}
