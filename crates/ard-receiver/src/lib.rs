//! # Interledger Secret Receiver Component
//!
//! ## Purpose
//!
//! Accepts externally-originated secret-disclosure deliveries, validates
//! each one against the registry over the cross-component invocation port,
//! persists accepted items in an append-only log, and acknowledges every
//! delivery attempt with exactly one accept or reject event.
//!
//! ```text
//! interledgerReceive(nonce, payload)
//!         │
//!         ▼
//! ┌──────────────────┐  readVulnerability  ┌──────────────┐
//! │ ReceiverService  │ ──────────────────▶ │   Registry   │
//! │  nonce dedup     │ ◀────────────────── │              │
//! │  policy gate     │   record / error    └──────────────┘
//! └───────┬──────────┘
//!         │ append + persist, then
//!         ▼
//!   InterledgerEventAccepted / InterledgerEventRejected
//! ```
//!
//! ## Guarantees
//!
//! - **Idempotency**: a redelivered nonce is answered from the log, with no
//!   registry call and no second event.
//! - **Ordering**: an event is emitted only after the log durably reflects
//!   the outcome.
//! - **Failure mapping**: a failed registry call rejects the delivery; it
//!   never partially applies it.

pub mod adapters;
pub mod commands;
pub mod domain;
pub mod handler;
pub mod policy;
pub mod ports;
pub mod service;

pub use adapters::InvokingRegistryClient;
pub use commands::ReceiverCommand;
pub use domain::SecretDataLog;
pub use handler::ReceiverHandler;
pub use policy::{AcceptKnown, DisclosurePolicy, RequirePatched};
pub use ports::{MockRegistryClient, RegistryClient};
pub use service::{DeliveryOutcome, ReceiverService};
