//! Policy wrappers over the base field interceptor.
//!
//! Each wrapper overrides exactly one concern (logging, validation,
//! authorization, persistence) and delegates everything else to the inner
//! interceptor. Wrappers chain by nesting, outermost policy first, so
//! `LoggedField<ValidatingField<PlainField<String>, Ipv4Rule>>` logs the
//! outcome of a validated write. The computed-property interceptor stands
//! alone: it replaces storage access with caller-supplied accessors.

pub mod computed;
pub mod guard;
pub mod logged;
pub mod persist;
pub mod validate;
