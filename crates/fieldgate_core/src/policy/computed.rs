//! Computed-property interceptor.
//!
//! # Responsibility
//! - Delegate read/write/delete to caller-supplied accessor procedures
//!   instead of touching storage under a fixed key directly.
//! - Support incremental composition: bind a getter first, attach a setter
//!   and deleter later, each attachment yielding a new fully-composed
//!   interceptor.
//!
//! # Invariants
//! - An operation with no bound accessor fails with
//!   `FieldError::NoAccessor`; nothing else runs.

use crate::field::{
    FieldError, FieldInterceptor, FieldOp, FieldResult, FieldStorage, StorageKey, StorageKeyed,
};

type Getter<V> = Box<dyn Fn(&FieldStorage<V>) -> FieldResult<V> + Send + Sync>;
type Setter<V> = Box<dyn Fn(&mut FieldStorage<V>, V) -> FieldResult<()> + Send + Sync>;
type Deleter<V> = Box<dyn Fn(&mut FieldStorage<V>) -> FieldResult<()> + Send + Sync>;

/// Interceptor whose operations are caller-supplied procedures.
///
/// Accessors receive the instance's storage and may derive, transform, or
/// store values however they like; the interceptor contributes only the
/// storage key and the missing-accessor checks.
pub struct ComputedField<V> {
    key: StorageKey,
    getter: Option<Getter<V>>,
    setter: Option<Setter<V>>,
    deleter: Option<Deleter<V>>,
}

impl<V> ComputedField<V> {
    /// Binds a computed field to `field_name` with a getter only.
    pub fn with_getter<G>(field_name: &str, getter: G) -> Self
    where
        G: Fn(&FieldStorage<V>) -> FieldResult<V> + Send + Sync + 'static,
    {
        Self {
            key: StorageKey::derive(field_name),
            getter: Some(Box::new(getter)),
            setter: None,
            deleter: None,
        }
    }

    /// Attaches a setter, producing the next composition step.
    pub fn and_setter<S>(mut self, setter: S) -> Self
    where
        S: Fn(&mut FieldStorage<V>, V) -> FieldResult<()> + Send + Sync + 'static,
    {
        self.setter = Some(Box::new(setter));
        self
    }

    /// Attaches a deleter, producing the next composition step.
    pub fn and_deleter<D>(mut self, deleter: D) -> Self
    where
        D: Fn(&mut FieldStorage<V>) -> FieldResult<()> + Send + Sync + 'static,
    {
        self.deleter = Some(Box::new(deleter));
        self
    }

    fn no_accessor(&self, operation: FieldOp) -> FieldError {
        FieldError::NoAccessor {
            key: self.key.clone(),
            operation,
        }
    }
}

impl<V> StorageKeyed for ComputedField<V> {
    fn bound_key(&self) -> &StorageKey {
        &self.key
    }
}

impl<V> FieldInterceptor<V> for ComputedField<V> {
    fn storage_key(&self) -> &StorageKey {
        &self.key
    }

    fn read(&self, storage: &FieldStorage<V>) -> FieldResult<V> {
        match &self.getter {
            Some(getter) => getter(storage),
            None => Err(self.no_accessor(FieldOp::Read)),
        }
    }

    fn write(&self, storage: &mut FieldStorage<V>, value: V) -> FieldResult<()> {
        match &self.setter {
            Some(setter) => setter(storage, value),
            None => Err(self.no_accessor(FieldOp::Write)),
        }
    }

    fn delete(&self, storage: &mut FieldStorage<V>) -> FieldResult<()> {
        match &self.deleter {
            Some(deleter) => deleter(storage),
            None => Err(self.no_accessor(FieldOp::Delete)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ComputedField;
    use crate::field::{FieldError, FieldInterceptor, FieldOp, FieldStorage, StorageKey};

    fn backing_key() -> StorageKey {
        StorageKey::derive("celsius")
    }

    fn getter_only() -> ComputedField<i64> {
        ComputedField::with_getter("celsius", |storage| {
            storage
                .get(&backing_key())
                .copied()
                .ok_or_else(|| FieldError::Missing { key: backing_key() })
        })
    }

    #[test]
    fn write_fails_until_setter_is_attached() {
        let field = getter_only();
        let mut storage = FieldStorage::new();

        let err = field
            .write(&mut storage, 21)
            .expect_err("no setter bound yet");
        assert!(matches!(
            err,
            FieldError::NoAccessor {
                operation: FieldOp::Write,
                ..
            }
        ));
    }

    #[test]
    fn attaching_setter_and_deleter_completes_the_property() {
        let field = getter_only()
            .and_setter(|storage, value| {
                storage.insert(&backing_key(), value);
                Ok(())
            })
            .and_deleter(|storage| match storage.remove(&backing_key()) {
                Some(_) => Ok(()),
                None => Err(FieldError::Missing { key: backing_key() }),
            });
        let mut storage = FieldStorage::new();

        field.write(&mut storage, 21).unwrap();
        assert_eq!(field.read(&storage).unwrap(), 21);

        field.delete(&mut storage).unwrap();
        assert!(matches!(
            field.read(&storage),
            Err(FieldError::Missing { .. })
        ));
    }
}
