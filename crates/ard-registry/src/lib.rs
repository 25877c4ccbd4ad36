//! # Vulnerability Registry Component
//!
//! ## Purpose
//!
//! Authoritative store of vulnerability records with two-tier read
//! visibility, and the single validation oracle the receiver consults
//! before accepting an interledger delivery.
//!
//! ```text
//! createVulnerability ──▶ ┌────────────────────────────┐
//! getVendorHistory   ──▶  │      RegistryService       │
//! getResearcherContact ─▶ │                            │
//! readVulnerability ───▶  │  vendor tier │ authority   │
//!                         │  records +   │ tier        │
//!                         │  indexes     │ details     │
//!                         └────────────────────────────┘
//! ```
//!
//! ## Data Layout
//!
//! The vendor tier holds the records under composite keys plus two
//! indexes: per-vendor creation order, and vulnerability id to vendor id
//! resolution. The authority tier holds the private details keyed by
//! vulnerability id. A create writes all of them atomically, with a
//! compensating rollback if any write fails.

pub mod commands;
pub mod domain;
pub mod handler;
pub mod service;

pub use commands::RegistryCommand;
pub use domain::{CreateVulnerabilityParams, LookupKey, RecordKey};
pub use handler::RegistryHandler;
pub use service::RegistryService;
