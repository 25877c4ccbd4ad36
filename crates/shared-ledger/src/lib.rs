//! # Shared Ledger - Runtime Abstraction for Both Components
//!
//! The registry and the receiver never talk to a concrete ledger platform
//! directly. Everything they need from it is expressed as the four port
//! traits in this crate, and the platform (or the in-memory fabric shipped
//! here) provides the implementations.
//!
//! ## Interaction Pattern
//!
//! ```text
//! ┌──────────────┐   invoke()    ┌──────────────┐
//! │   Receiver   │ ────────────▶ │   Registry   │
//! │              │               │              │
//! └──────┬───────┘               └──────┬───────┘
//!        │ emit()                       │ put_private()
//!        ▼                              ▼
//!  ┌──────────────┐              ┌──────────────┐
//!  │  Event Bus   │              │  Partitions  │
//!  └──────────────┘              └──────────────┘
//! ```
//!
//! ## Visibility
//!
//! - **Partition policy**: the tier-to-reader mapping lives in one table
//!   (`Partition::allowed_readers`); handlers consult it, the platform
//!   enforces it.
//! - **Typed routing**: cross-component calls resolve through handlers
//!   registered once at startup, never through a global dispatch table.

pub mod emitter;
pub mod invoker;
pub mod memory;
pub mod store;

// Re-export main types
pub use emitter::{EventEmitter, EventSubscription};
pub use invoker::{ComponentHandler, ComponentInvoker};
pub use memory::{InMemoryLedger, InMemoryPartitionStore, InMemoryStateStore};
pub use store::{Partition, PrivateDataStore, StateStore};

/// Maximum events to buffer per subscriber before older events are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
