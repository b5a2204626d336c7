//! Providers of raw audit payloads.
//!
//! The normalizer never fetches anything itself; callers pick a source
//! (live API, stored blob on disk, or the demo fixture) and hand its
//! payload over. Sources are swappable so tests can inject their own.

pub mod demo;
pub mod http;
pub mod stored;

use serde_json::Value;

use crate::error::AuditError;

pub use demo::DemoSource;
pub use http::{HttpSource, HttpSourceConfig};
pub use stored::StoredBlobSource;

pub trait PayloadSource {
    /// Load the raw payload for `domain` (already reduced to a bare host).
    ///
    /// Sources report only transport-level failures and definite absence;
    /// content problems are left to normalization.
    fn load(&self, domain: &str) -> Result<Value, AuditError>;
}
