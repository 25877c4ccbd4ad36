//! # Interledger Events
//!
//! The two acknowledgement events the receiver emits back toward the
//! sending side. Events are ephemeral notifications, not stored state, and
//! each carries the nonce of the delivery it resolves so the sender can
//! correlate acknowledgements with deliveries.

use serde::{Deserialize, Serialize};

/// Acknowledgement of one interledger delivery attempt.
///
/// Exactly one event is emitted per delivery attempt, after the receiver's
/// state reflects the outcome. A redelivered nonce emits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterledgerEvent {
    /// The delivery was validated and its item persisted.
    Accepted { nonce: u64 },
    /// The delivery was rejected; the item log is unchanged.
    Rejected { nonce: u64 },
}

impl InterledgerEvent {
    /// Wire name of the acceptance event.
    pub const ACCEPTED_NAME: &'static str = "InterledgerEventAccepted";

    /// Wire name of the rejection event.
    pub const REJECTED_NAME: &'static str = "InterledgerEventRejected";

    /// The event name an external subscriber sees.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            InterledgerEvent::Accepted { .. } => Self::ACCEPTED_NAME,
            InterledgerEvent::Rejected { .. } => Self::REJECTED_NAME,
        }
    }

    /// The nonce of the delivery this event resolves.
    #[must_use]
    pub fn nonce(&self) -> u64 {
        match self {
            InterledgerEvent::Accepted { nonce } | InterledgerEvent::Rejected { nonce } => *nonce,
        }
    }

    /// Returns true for the acceptance variant.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, InterledgerEvent::Accepted { .. })
    }
}
