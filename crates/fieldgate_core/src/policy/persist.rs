//! Persisted interceptor wrapper.
//!
//! # Responsibility
//! - Mirror every successful in-memory write to a JSON file, synchronously,
//!   before the write returns.
//! - Reload a previously persisted value into an instance (`hydrate`).
//!
//! # Invariants
//! - The medium is replaced wholesale on every write (temp file + rename),
//!   never appended or patched.
//! - Rollback policy: when the medium write fails, the in-memory write is
//!   undone and `FieldError::Persistence` is returned, so memory and the
//!   error surface agree that the operation did not happen.

use crate::field::{
    FieldError, FieldInterceptor, FieldResult, FieldStorage, PersistError, StorageKey,
    StorageKeyed,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Wrapper that mirrors writes to a file-like durable store.
///
/// The store path is fixed at binding time. The on-disk document is a JSON
/// object mapping the storage key to the serialized value:
/// `{"_config": {"host": "localhost", "port": "8088"}}`.
#[derive(Debug, Clone)]
pub struct PersistedField<I> {
    inner: I,
    path: PathBuf,
}

impl<I> PersistedField<I> {
    pub fn new(inner: I, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }

    /// The durable store path this interceptor was bound to.
    pub fn store_path(&self) -> &Path {
        &self.path
    }
}

impl<I> PersistedField<I> {
    fn persist<V: Serialize>(&self, key: &StorageKey, value: &V) -> Result<(), PersistError> {
        let mut document = BTreeMap::new();
        document.insert(key.as_str(), value);
        let encoded = serde_json::to_vec_pretty(&document)?;

        // Full-replace write: stage next to the target, then rename over it.
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, encoded)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    /// Loads the persisted value for this field, if the medium holds one.
    ///
    /// Returns `Ok(None)` when the store file does not exist yet.
    ///
    /// # Errors
    /// - `FieldError::Persistence` when the medium cannot be read or the
    ///   document does not decode.
    pub fn load<V: DeserializeOwned>(&self) -> FieldResult<Option<V>>
    where
        I: StorageKeyed,
    {
        let key = self.inner.bound_key();
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(FieldError::Persistence {
                    key: key.clone(),
                    source: PersistError::Io(err),
                })
            }
        };

        let mut document: BTreeMap<String, V> =
            serde_json::from_slice(&raw).map_err(|err| FieldError::Persistence {
                key: key.clone(),
                source: PersistError::Encode(err),
            })?;
        Ok(document.remove(key.as_str()))
    }
}

impl<V, I> FieldInterceptor<V> for PersistedField<I>
where
    V: Serialize + Clone,
    I: FieldInterceptor<V>,
{
    fn storage_key(&self) -> &StorageKey {
        self.inner.storage_key()
    }

    fn read(&self, storage: &FieldStorage<V>) -> FieldResult<V> {
        self.inner.read(storage)
    }

    fn write(&self, storage: &mut FieldStorage<V>, value: V) -> FieldResult<()> {
        let key = self.inner.storage_key().clone();
        let previous = storage.get(&key).cloned();

        self.inner.write(storage, value)?;

        let written = storage
            .get(&key)
            .cloned()
            .ok_or_else(|| FieldError::Missing { key: key.clone() })?;

        if let Err(source) = self.persist(&key, &written) {
            // Roll back so memory never claims a write the medium lost.
            match previous {
                Some(prior) => {
                    storage.insert(&key, prior);
                }
                None => {
                    storage.remove(&key);
                }
            }
            return Err(FieldError::Persistence { key, source });
        }
        Ok(())
    }

    fn delete(&self, storage: &mut FieldStorage<V>) -> FieldResult<()> {
        self.inner.delete(storage)
    }
}

/// Hydrates `storage` from the medium, returning whether a value was found.
///
/// Used at instance construction to resume a disk-synchronized field.
pub fn hydrate<V, I>(field: &PersistedField<I>, storage: &mut FieldStorage<V>) -> FieldResult<bool>
where
    V: Serialize + Clone + DeserializeOwned,
    I: FieldInterceptor<V> + StorageKeyed,
{
    match field.load::<V>()? {
        Some(value) => {
            storage.insert(field.inner.bound_key(), value);
            Ok(true)
        }
        None => Ok(false),
    }
}
