//! Disk-synchronized application configuration record.
//!
//! # Responsibility
//! - Bind one persisted `config` field per store path and share it across
//!   all `AppConfig` instances created from that binding.
//! - Mirror every accepted write to the store file before returning.
//!
//! # Invariants
//! - Rollback policy (documented choice): a failed medium write undoes the
//!   in-memory write and surfaces `FieldError::Persistence`.

use crate::field::{FieldInterceptor, FieldResult, FieldStorage, PlainField};
use crate::policy::persist::{hydrate, PersistedField};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Service endpoint shape used as the persisted config value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub host: String,
    pub port: String,
}

/// Type-level binding for the persisted `config` field.
///
/// One store is bound per durable path; `AppConfig` instances own only
/// their private storage and route every access through the shared store.
pub struct ConfigStore {
    config: PersistedField<PlainField<ServiceEndpoint>>,
}

impl ConfigStore {
    /// Binds the `config` field to a durable store at `path`.
    ///
    /// Binding happens once; instances created afterwards share it.
    pub fn bind(path: impl Into<PathBuf>) -> Self {
        Self {
            config: PersistedField::new(PlainField::bind("config"), path),
        }
    }

    /// The durable store path this binding writes to.
    pub fn store_path(&self) -> &Path {
        self.config.store_path()
    }

    /// Creates an instance with empty (`Unset`) storage.
    pub fn new_instance(&self) -> AppConfig {
        AppConfig {
            fields: FieldStorage::new(),
        }
    }

    /// Creates an instance pre-loaded from the store file, if present.
    pub fn open_instance(&self) -> FieldResult<AppConfig> {
        let mut instance = self.new_instance();
        hydrate(&self.config, &mut instance.fields)?;
        Ok(instance)
    }

    /// Returns the last successfully written endpoint configuration.
    pub fn read(&self, instance: &AppConfig) -> FieldResult<ServiceEndpoint> {
        self.config.read(&instance.fields)
    }

    /// Writes `value` in memory and mirrors it to the store file.
    ///
    /// # Errors
    /// - `FieldError::Persistence` when the medium is unavailable; the
    ///   in-memory value is rolled back to its prior state.
    pub fn write(&self, instance: &mut AppConfig, value: ServiceEndpoint) -> FieldResult<()> {
        self.config.write(&mut instance.fields, value)
    }

    /// Removes the in-memory value; the store file keeps its last snapshot.
    pub fn delete(&self, instance: &mut AppConfig) -> FieldResult<()> {
        self.config.delete(&mut instance.fields)
    }
}

/// One application configuration instance; owns only its field storage.
#[derive(Debug, Default)]
pub struct AppConfig {
    fields: FieldStorage<ServiceEndpoint>,
}

#[cfg(test)]
mod tests {
    use super::{ConfigStore, ServiceEndpoint};
    use crate::field::FieldError;

    fn endpoint() -> ServiceEndpoint {
        ServiceEndpoint {
            host: "localhost".to_string(),
            port: "8088".to_string(),
        }
    }

    #[test]
    fn instances_share_the_binding_but_not_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::bind(dir.path().join("app.json"));

        let mut first = store.new_instance();
        let second = store.new_instance();

        store.write(&mut first, endpoint()).unwrap();
        assert_eq!(store.read(&first).unwrap(), endpoint());
        assert!(matches!(
            store.read(&second),
            Err(FieldError::Missing { .. })
        ));
    }

    #[test]
    fn open_instance_resumes_last_persisted_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::bind(dir.path().join("app.json"));

        let mut writer = store.new_instance();
        store.write(&mut writer, endpoint()).unwrap();

        let resumed = store.open_instance().unwrap();
        assert_eq!(store.read(&resumed).unwrap(), endpoint());
    }
}
