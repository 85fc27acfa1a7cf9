//! Policy-free base interceptor.

use crate::field::{
    FieldError, FieldInterceptor, FieldResult, FieldStorage, StorageKey, StorageKeyed,
    ValueMarker,
};
use std::marker::PhantomData;

/// Direct-storage interceptor with no policy attached.
///
/// Every policy wrapper composes around this (or around another wrapper);
/// `PlainField` is where the `{Unset, Set}` state machine is enforced.
#[derive(Debug, Clone)]
pub struct PlainField<V> {
    key: StorageKey,
    _value: ValueMarker<V>,
}

impl<V> PlainField<V> {
    /// Binds the base interceptor to `field_name`, deriving its key.
    pub fn bind(field_name: &str) -> Self {
        Self {
            key: StorageKey::derive(field_name),
            _value: PhantomData,
        }
    }
}

impl<V> StorageKeyed for PlainField<V> {
    fn bound_key(&self) -> &StorageKey {
        &self.key
    }
}

impl<V: Clone> FieldInterceptor<V> for PlainField<V> {
    fn storage_key(&self) -> &StorageKey {
        &self.key
    }

    fn read(&self, storage: &FieldStorage<V>) -> FieldResult<V> {
        storage
            .get(&self.key)
            .cloned()
            .ok_or_else(|| FieldError::Missing {
                key: self.key.clone(),
            })
    }

    fn write(&self, storage: &mut FieldStorage<V>, value: V) -> FieldResult<()> {
        storage.insert(&self.key, value);
        Ok(())
    }

    fn delete(&self, storage: &mut FieldStorage<V>) -> FieldResult<()> {
        match storage.remove(&self.key) {
            Some(_) => Ok(()),
            None => Err(FieldError::Missing {
                key: self.key.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlainField;
    use crate::field::{FieldError, FieldInterceptor, FieldStorage};

    #[test]
    fn read_before_first_write_is_missing() {
        let field = PlainField::<String>::bind("label");
        let storage = FieldStorage::new();

        let err = field.read(&storage).expect_err("unset field must not read");
        assert!(matches!(err, FieldError::Missing { .. }));
    }

    #[test]
    fn write_then_read_round_trips_exact_value() {
        let field = PlainField::bind("label");
        let mut storage = FieldStorage::new();

        field.write(&mut storage, "alpha".to_string()).unwrap();
        assert_eq!(field.read(&storage).unwrap(), "alpha");

        field.write(&mut storage, "beta".to_string()).unwrap();
        assert_eq!(field.read(&storage).unwrap(), "beta");
    }

    #[test]
    fn delete_returns_field_to_unset() {
        let field = PlainField::bind("label");
        let mut storage = FieldStorage::new();

        field.write(&mut storage, 7_i64).unwrap();
        field.delete(&mut storage).unwrap();

        let read_err = field.read(&storage).expect_err("deleted field must not read");
        assert!(matches!(read_err, FieldError::Missing { .. }));

        let delete_err = field
            .delete(&mut storage)
            .expect_err("deleting an unset field must fail");
        assert!(matches!(delete_err, FieldError::Missing { .. }));
    }
}
