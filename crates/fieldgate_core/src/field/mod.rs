//! Field storage and interception contracts.
//!
//! # Responsibility
//! - Define the per-instance field storage map and its deterministic keys.
//! - Define the shared `FieldInterceptor` contract and its error taxonomy.
//! - Provide the policy-free base interceptor (`PlainField`).
//!
//! # Invariants
//! - A storage key is derived from the declared field name exactly once,
//!   at interceptor construction time, and is unique per field name.
//! - Interceptors hold no per-instance state; every per-instance value
//!   lives in the instance's own `FieldStorage`, under the storage key.
//! - A field is either `Unset` or `Set`: writes move it to `Set`, delete
//!   moves it back to `Unset`, and reads are only valid while `Set`.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub mod plain;

pub use plain::PlainField;

/// Result alias for every field operation.
pub type FieldResult<T> = Result<T, FieldError>;

/// Deterministic storage key derived from a declared field name.
///
/// The key is the field name prefixed with `_`, marking the slot as the
/// private backing of the logical field (`src_ipv4` -> `_src_ipv4`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derives the backing key for `field_name`.
    ///
    /// # Contract
    /// - Called once per field, when the interceptor is bound to the
    ///   record type, before any instance performs its first access.
    pub fn derive(field_name: &str) -> Self {
        Self(format!("_{field_name}"))
    }

    /// Returns the derived key text, prefix included.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field operation kind, used in errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    Read,
    Write,
    Delete,
}

impl FieldOp {
    /// Stable string id used in log lines and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        }
    }
}

/// Error taxonomy shared by all interceptor variants.
#[derive(Debug)]
pub enum FieldError {
    /// Read or delete before the first write, or after a delete.
    Missing { key: StorageKey },
    /// Write value rejected by the bound validation rule.
    Validation { key: StorageKey, reason: String },
    /// Authorization predicate returned false; storage was not touched.
    Unauthorized { key: StorageKey, operation: FieldOp },
    /// External medium write failed; the in-memory write was rolled back.
    Persistence {
        key: StorageKey,
        source: PersistError,
    },
    /// Computed-property operation invoked before its accessor was bound.
    NoAccessor { key: StorageKey, operation: FieldOp },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { key } => write!(f, "no value stored under `{key}`"),
            Self::Validation { key, reason } => {
                write!(f, "validation failed for `{key}`: {reason}")
            }
            Self::Unauthorized { key, operation } => {
                write!(f, "unauthorized {} on `{key}`", operation.as_str())
            }
            Self::Persistence { key, source } => {
                write!(f, "persistence failed for `{key}`: {source}")
            }
            Self::NoAccessor { key, operation } => {
                write!(f, "no {} accessor bound for `{key}`", operation.as_str())
            }
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure detail for the persisted interceptor's external medium.
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Instance-owned private storage: storage key -> current value.
///
/// Each record instance owns exactly one `FieldStorage`; the shared
/// interceptors read and write it on the instance's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStorage<V> {
    slots: BTreeMap<StorageKey, V>,
}

impl<V> Default for FieldStorage<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FieldStorage<V> {
    /// Creates empty storage; every field starts `Unset`.
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Returns the current value under `key`, if the field is `Set`.
    pub fn get(&self, key: &StorageKey) -> Option<&V> {
        self.slots.get(key)
    }

    /// Stores `value` under `key`, returning the replaced value if any.
    pub fn insert(&mut self, key: &StorageKey, value: V) -> Option<V> {
        self.slots.insert(key.clone(), value)
    }

    /// Removes the value under `key`, moving the field back to `Unset`.
    pub fn remove(&mut self, key: &StorageKey) -> Option<V> {
        self.slots.remove(key)
    }

    /// Returns whether the field behind `key` is currently `Set`.
    pub fn contains(&self, key: &StorageKey) -> bool {
        self.slots.contains_key(key)
    }
}

/// Access to the bound storage key without fixing the value type.
///
/// `FieldInterceptor::storage_key` cannot be named from generic helpers
/// that never mention `V`; interceptors expose the key through this
/// narrower contract as well.
pub trait StorageKeyed {
    fn bound_key(&self) -> &StorageKey;
}

/// Shared, type-level interceptor contract for one logical field.
///
/// Implementations are bound once, at record-type definition time, and are
/// shared by every instance of the type. Operations receive the instance's
/// own storage, so the interceptor itself stays stateless apart from
/// configuration fixed at binding time.
pub trait FieldInterceptor<V> {
    /// The key this interceptor was bound to.
    fn storage_key(&self) -> &StorageKey;

    /// Returns exactly the last successfully written value.
    ///
    /// # Errors
    /// - `FieldError::Missing` when the field is `Unset`.
    fn read(&self, storage: &FieldStorage<V>) -> FieldResult<V>;

    /// Stores `value` after all bound policy checks pass.
    ///
    /// # Errors
    /// - Policy-specific errors; storage is left unchanged on failure.
    fn write(&self, storage: &mut FieldStorage<V>, value: V) -> FieldResult<()>;

    /// Removes the current value, moving the field back to `Unset`.
    ///
    /// # Errors
    /// - `FieldError::Missing` when the field is already `Unset`.
    fn delete(&self, storage: &mut FieldStorage<V>) -> FieldResult<()>;
}

/// Marker carrying the value type of an interceptor without owning one.
///
/// `fn() -> V` keeps the marker `Send + Sync` regardless of `V`.
pub(crate) type ValueMarker<V> = PhantomData<fn() -> V>;

#[cfg(test)]
mod tests {
    use super::{FieldStorage, StorageKey};

    #[test]
    fn storage_key_is_field_name_with_private_prefix() {
        let key = StorageKey::derive("src_ipv4");
        assert_eq!(key.as_str(), "_src_ipv4");
        assert_eq!(key.to_string(), "_src_ipv4");
    }

    #[test]
    fn storage_keys_are_unique_per_field_name() {
        assert_ne!(StorageKey::derive("src_ipv4"), StorageKey::derive("dst_ipv4"));
        assert_eq!(StorageKey::derive("port"), StorageKey::derive("port"));
    }

    #[test]
    fn storage_starts_empty_and_tracks_set_state() {
        let key = StorageKey::derive("port");
        let mut storage = FieldStorage::new();
        assert!(!storage.contains(&key));

        storage.insert(&key, 8088_u16);
        assert!(storage.contains(&key));
        assert_eq!(storage.get(&key), Some(&8088));

        assert_eq!(storage.remove(&key), Some(8088));
        assert!(!storage.contains(&key));
        assert_eq!(storage.remove(&key), None);
    }
}
