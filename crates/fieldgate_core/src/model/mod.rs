//! Concrete record types built on shared field interceptors.
//!
//! # Responsibility
//! - Show the binding pattern: interceptors registered once per record
//!   type, instances owning only their private storage.
//!
//! # Invariants
//! - Every logical field is bound to exactly one interceptor, before the
//!   first instance access.

pub mod app_config;
pub mod flow;
