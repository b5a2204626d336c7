//! Display metrics derived from a canonical [`AuditRecord`].
//!
//! Every function here is pure and order-preserving: the same record
//! always yields the same numbers, and checklist order is never changed.
//!
//! [`AuditRecord`]: crate::record::model::AuditRecord

pub mod cookies;
pub mod distribution;
pub mod indicators;
pub mod parts;
pub mod risk;
