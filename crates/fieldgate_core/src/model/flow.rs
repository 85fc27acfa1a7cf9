//! Network flow record with validated IPv4 endpoint fields.
//!
//! # Responsibility
//! - Bind `src_ipv4` / `dst_ipv4` once, at type-definition time, to shared
//!   logged + IPv4-validated interceptors.
//! - Expose ordinary accessor methods that delegate to those interceptors.

use crate::field::{FieldInterceptor, FieldResult, FieldStorage, PlainField};
use crate::policy::logged::LoggedField;
use crate::policy::validate::{Ipv4Rule, ValidatingField};
use once_cell::sync::Lazy;

type Ipv4Field = LoggedField<ValidatingField<PlainField<String>, Ipv4Rule>>;

fn bind_ipv4_field(field_name: &str) -> Ipv4Field {
    LoggedField::new(ValidatingField::new(PlainField::bind(field_name), Ipv4Rule))
}

// Type-level bindings, shared by every Flow instance.
static SRC_IPV4: Lazy<Ipv4Field> = Lazy::new(|| bind_ipv4_field("src_ipv4"));
static DST_IPV4: Lazy<Ipv4Field> = Lazy::new(|| bind_ipv4_field("dst_ipv4"));

/// One observed network flow.
///
/// Both endpoint fields start `Unset`; reads before the first successful
/// write fail with `FieldError::Missing`.
#[derive(Debug, Default)]
pub struct Flow {
    fields: FieldStorage<String>,
}

impl Flow {
    pub fn new() -> Self {
        Self {
            fields: FieldStorage::new(),
        }
    }

    pub fn src_ipv4(&self) -> FieldResult<String> {
        SRC_IPV4.read(&self.fields)
    }

    pub fn set_src_ipv4(&mut self, value: impl Into<String>) -> FieldResult<()> {
        SRC_IPV4.write(&mut self.fields, value.into())
    }

    pub fn clear_src_ipv4(&mut self) -> FieldResult<()> {
        SRC_IPV4.delete(&mut self.fields)
    }

    pub fn dst_ipv4(&self) -> FieldResult<String> {
        DST_IPV4.read(&self.fields)
    }

    pub fn set_dst_ipv4(&mut self, value: impl Into<String>) -> FieldResult<()> {
        DST_IPV4.write(&mut self.fields, value.into())
    }

    pub fn clear_dst_ipv4(&mut self) -> FieldResult<()> {
        DST_IPV4.delete(&mut self.fields)
    }
}
