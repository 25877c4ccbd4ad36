//! # Event Emission Port
//!
//! The fire-and-forget channel carrying interledger acknowledgements back
//! toward the external sender. Emission never fails the emitting
//! transaction; a delivery outcome is durable before its event is sent.

use async_trait::async_trait;
use shared_types::InterledgerEvent;
use tokio::sync::broadcast;
use tracing::warn;

/// Trait for emitting interledger events.
#[async_trait]
pub trait EventEmitter: Send + Sync {
    /// Emits an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received the event. Zero
    /// subscribers is not an error; the event is simply dropped.
    async fn emit(&self, event: InterledgerEvent) -> usize;

    /// Total number of events emitted so far.
    fn events_emitted(&self) -> u64;
}

/// A subscriber handle over the event channel.
///
/// External acknowledgement consumers (and tests) hold one of these and
/// correlate events with deliveries by nonce.
pub struct EventSubscription {
    receiver: broadcast::Receiver<InterledgerEvent>,
}

impl EventSubscription {
    pub(crate) fn new(receiver: broadcast::Receiver<InterledgerEvent>) -> Self {
        EventSubscription { receiver }
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the channel is closed and drained. A lagged
    /// subscriber skips the overwritten events and keeps receiving.
    pub async fn recv(&mut self) -> Option<InterledgerEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "[ledger] event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next event if one is already buffered.
    pub fn try_recv(&mut self) -> Option<InterledgerEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "[ledger] event subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }

    /// Drains every buffered event, in emission order.
    pub fn drain(&mut self) -> Vec<InterledgerEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}
