//! # Shared Types Crate
//!
//! This crate contains the vulnerability record entities, the interledger
//! event types, the shared error enum, and the `Invocation` envelope used
//! for all cross-component communication.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-component types are defined here.
//! - **Typed Wire Forms**: Enumerated fields (severity, patch state, payment
//!   state) are real enums; their string forms appear only at the argument
//!   parsing boundary.
//! - **Envelope Authority**: The `Invocation` envelope's `caller` is the sole
//!   source of the calling organization's identity; payloads never duplicate it.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod events;

pub use entities::*;
pub use envelope::*;
pub use errors::LedgerError;
pub use events::InterledgerEvent;
