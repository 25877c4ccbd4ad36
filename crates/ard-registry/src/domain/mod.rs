//! Registry domain model: record keys and validated creation parameters.

pub mod keys;
pub mod params;

pub use keys::{vendor_index_key, vulnerability_index_key, LookupKey, RecordKey};
pub use params::CreateVulnerabilityParams;
