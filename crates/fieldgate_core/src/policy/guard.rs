//! Access-controlled interceptor wrapper.
//!
//! # Responsibility
//! - Gate read, write, and delete behind a pluggable authorization
//!   predicate over the record instance's state.
//!
//! # Invariants
//! - Fails closed: a false predicate means no storage access of any kind.
//! - The guard relies on callers going through the interceptor; it does
//!   not defend against code that reaches into `FieldStorage` directly.

use crate::field::{FieldError, FieldInterceptor, FieldOp, FieldResult, FieldStorage, StorageKey};

/// Pluggable authorization predicate, evaluated against the instance's
/// own storage before each operation.
pub trait AccessPolicy<V> {
    fn is_authorized(&self, storage: &FieldStorage<V>) -> bool;
}

/// Blanket impl so plain closures can serve as policies.
impl<V, F> AccessPolicy<V> for F
where
    F: Fn(&FieldStorage<V>) -> bool,
{
    fn is_authorized(&self, storage: &FieldStorage<V>) -> bool {
        self(storage)
    }
}

/// Wrapper that checks an authorization predicate before delegating.
#[derive(Debug, Clone)]
pub struct GuardedField<I, P> {
    inner: I,
    policy: P,
}

impl<I, P> GuardedField<I, P> {
    pub fn new(inner: I, policy: P) -> Self {
        Self { inner, policy }
    }
}

impl<V, I, P> FieldInterceptor<V> for GuardedField<I, P>
where
    I: FieldInterceptor<V>,
    P: AccessPolicy<V>,
{
    fn storage_key(&self) -> &StorageKey {
        self.inner.storage_key()
    }

    fn read(&self, storage: &FieldStorage<V>) -> FieldResult<V> {
        if !self.policy.is_authorized(storage) {
            return Err(FieldError::Unauthorized {
                key: self.inner.storage_key().clone(),
                operation: FieldOp::Read,
            });
        }
        self.inner.read(storage)
    }

    fn write(&self, storage: &mut FieldStorage<V>, value: V) -> FieldResult<()> {
        if !self.policy.is_authorized(storage) {
            return Err(FieldError::Unauthorized {
                key: self.inner.storage_key().clone(),
                operation: FieldOp::Write,
            });
        }
        self.inner.write(storage, value)
    }

    fn delete(&self, storage: &mut FieldStorage<V>) -> FieldResult<()> {
        if !self.policy.is_authorized(storage) {
            return Err(FieldError::Unauthorized {
                key: self.inner.storage_key().clone(),
                operation: FieldOp::Delete,
            });
        }
        self.inner.delete(storage)
    }
}
