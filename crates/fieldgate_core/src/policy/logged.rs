//! Logging interceptor wrapper.
//!
//! # Responsibility
//! - Emit one structured log event per read/write/delete.
//! - Never block, retry, or alter the wrapped operation's outcome.

use crate::field::{FieldInterceptor, FieldResult, FieldStorage, StorageKey};
use log::info;
use std::fmt::Debug;

/// Wrapper that logs every field operation, then delegates unchanged.
///
/// Failures are logged with `status=error` and propagated as-is; this
/// wrapper never suppresses an error from the inner interceptor.
#[derive(Debug, Clone)]
pub struct LoggedField<I> {
    inner: I,
}

impl<I> LoggedField<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<V, I> FieldInterceptor<V> for LoggedField<I>
where
    V: Debug,
    I: FieldInterceptor<V>,
{
    fn storage_key(&self) -> &StorageKey {
        self.inner.storage_key()
    }

    fn read(&self, storage: &FieldStorage<V>) -> FieldResult<V> {
        let result = self.inner.read(storage);
        match &result {
            Ok(value) => info!(
                "event=field_read key={} status=ok value={value:?}",
                self.storage_key()
            ),
            Err(err) => info!(
                "event=field_read key={} status=error detail={err}",
                self.storage_key()
            ),
        }
        result
    }

    fn write(&self, storage: &mut FieldStorage<V>, value: V) -> FieldResult<()> {
        info!(
            "event=field_write key={} value={value:?}",
            self.storage_key()
        );
        let result = self.inner.write(storage, value);
        if let Err(err) = &result {
            info!(
                "event=field_write key={} status=error detail={err}",
                self.storage_key()
            );
        }
        result
    }

    fn delete(&self, storage: &mut FieldStorage<V>) -> FieldResult<()> {
        let result = self.inner.delete(storage);
        match &result {
            Ok(()) => info!("event=field_delete key={} status=ok", self.storage_key()),
            Err(err) => info!(
                "event=field_delete key={} status=error detail={err}",
                self.storage_key()
            ),
        }
        result
    }
}
