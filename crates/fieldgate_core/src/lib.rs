//! Field interception core for fieldgate.
//! This crate is the single source of truth for field access policy.
//!
//! A field interceptor is a shared, type-level policy object bound once
//! per record type; record instances own only their private storage, keyed
//! by the interceptor's field-derived storage key. Policy variants are
//! explicit wrappers composed outermost-first.
//!
//! Interceptors are stateless shared policy and storage is instance-owned;
//! concurrent writers must add their own synchronization around
//! `write`/`delete`.

pub mod field;
pub mod logging;
pub mod model;
pub mod policy;

pub use field::{
    FieldError, FieldInterceptor, FieldOp, FieldResult, FieldStorage, PersistError, PlainField,
    StorageKey, StorageKeyed,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::app_config::{AppConfig, ConfigStore, ServiceEndpoint};
pub use model::flow::Flow;
pub use policy::computed::ComputedField;
pub use policy::guard::{AccessPolicy, GuardedField};
pub use policy::logged::LoggedField;
pub use policy::persist::{hydrate, PersistedField};
pub use policy::validate::{Ipv4Rule, ValidatingField, ValidationRule};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
