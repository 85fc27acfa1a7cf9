//! Validating interceptor wrapper and built-in rules.
//!
//! # Responsibility
//! - Gate writes behind a pluggable validation rule.
//! - Leave storage untouched when the rule rejects a value.
//!
//! # Invariants
//! - Reads and deletes are never gated by validation.
//! - A rejected write maps to `FieldError::Validation` with the rule's
//!   reason text.

use crate::field::{FieldError, FieldInterceptor, FieldResult, FieldStorage, StorageKey};
use once_cell::sync::Lazy;
use regex::Regex;

static IPV4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("valid ipv4 regex"));

/// Pluggable write precondition.
///
/// Rules return the rejection reason, which ends up verbatim in
/// `FieldError::Validation`.
pub trait ValidationRule<V> {
    fn validate(&self, value: &V) -> Result<(), String>;
}

/// IPv4-shaped string rule: four dot-separated groups of 1-3 digits.
///
/// Known limitation, inherited deliberately: the pattern does not bound
/// each group to 0-255, so `999.1.1.1` passes. Callers needing strict
/// octet range checks must supply their own rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipv4Rule;

impl ValidationRule<String> for Ipv4Rule {
    fn validate(&self, value: &String) -> Result<(), String> {
        if IPV4_RE.is_match(value) {
            Ok(())
        } else {
            Err(format!("{value} is not a valid ipv4 address"))
        }
    }
}

/// Wrapper that runs a validation rule before delegating writes.
#[derive(Debug, Clone)]
pub struct ValidatingField<I, R> {
    inner: I,
    rule: R,
}

impl<I, R> ValidatingField<I, R> {
    pub fn new(inner: I, rule: R) -> Self {
        Self { inner, rule }
    }
}

impl<V, I, R> FieldInterceptor<V> for ValidatingField<I, R>
where
    I: FieldInterceptor<V>,
    R: ValidationRule<V>,
{
    fn storage_key(&self) -> &StorageKey {
        self.inner.storage_key()
    }

    fn read(&self, storage: &FieldStorage<V>) -> FieldResult<V> {
        self.inner.read(storage)
    }

    fn write(&self, storage: &mut FieldStorage<V>, value: V) -> FieldResult<()> {
        if let Err(reason) = self.rule.validate(&value) {
            return Err(FieldError::Validation {
                key: self.storage_key().clone(),
                reason,
            });
        }
        self.inner.write(storage, value)
    }

    fn delete(&self, storage: &mut FieldStorage<V>) -> FieldResult<()> {
        self.inner.delete(storage)
    }
}
