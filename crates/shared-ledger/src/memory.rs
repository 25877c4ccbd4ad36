//! # In-Memory Ledger Fabric
//!
//! A single-process implementation of all four ports, used by the test
//! suites and local runs. Per-key transaction isolation is modeled with
//! read-write locks; production deployments plug a real platform in behind
//! the same traits.
//!
//! Fault injection is part of the fabric on purpose: the atomicity
//! guarantees of the create path are only testable when a specific
//! partition's writes can be made to fail deterministically.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use shared_types::{ComponentId, ComponentResponse, InterledgerEvent, Invocation, LedgerError};

use crate::emitter::{EventEmitter, EventSubscription};
use crate::invoker::{ComponentHandler, ComponentInvoker};
use crate::store::{Partition, PrivateDataStore, StateStore};
use crate::DEFAULT_CHANNEL_CAPACITY;

/// In-memory ledger runtime backing both components.
pub struct InMemoryLedger {
    /// Component-scoped key-value state.
    state: RwLock<HashMap<(ComponentId, String), Vec<u8>>>,

    /// Private partitioned data.
    private: RwLock<HashMap<(Partition, String), Vec<u8>>>,

    /// Partitions whose puts currently fail.
    failing_private_puts: RwLock<HashSet<Partition>>,

    /// Components whose state puts currently fail.
    failing_state_puts: RwLock<HashSet<ComponentId>>,

    /// Handlers registered at startup, keyed by component.
    handlers: RwLock<HashMap<ComponentId, Arc<dyn ComponentHandler>>>,

    /// Broadcast sender for interledger events.
    sender: broadcast::Sender<InterledgerEvent>,

    /// Total events emitted.
    events_emitted: AtomicU64,

    /// Event channel capacity.
    capacity: usize,
}

impl InMemoryLedger {
    /// Creates a fabric with the default event channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a fabric with the given event channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            state: RwLock::new(HashMap::new()),
            private: RwLock::new(HashMap::new()),
            failing_private_puts: RwLock::new(HashSet::new()),
            failing_state_puts: RwLock::new(HashSet::new()),
            handlers: RwLock::new(HashMap::new()),
            sender,
            events_emitted: AtomicU64::new(0),
            capacity,
        }
    }

    /// Registers the handler serving `handler.component()`.
    ///
    /// Registration happens once at startup; a later registration for the
    /// same component replaces the earlier one.
    pub fn register_handler(&self, handler: Arc<dyn ComponentHandler>) {
        let component = handler.component();
        debug!(component = %component, "[ledger] handler registered");
        self.handlers.write().insert(component, handler);
    }

    /// Subscribes to the event channel.
    #[must_use]
    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription::new(self.sender.subscribe())
    }

    /// Number of live event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Event channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Makes every put into `partition` fail while enabled. Reads and
    /// deletes are unaffected, which keeps rollback behavior observable.
    pub fn set_fail_private_puts(&self, partition: Partition, fail: bool) {
        let mut failing = self.failing_private_puts.write();
        if fail {
            failing.insert(partition);
        } else {
            failing.remove(&partition);
        }
    }

    /// Makes every state put by `component` fail while enabled.
    pub fn set_fail_state_puts(&self, component: ComponentId, fail: bool) {
        let mut failing = self.failing_state_puts.write();
        if fail {
            failing.insert(component);
        } else {
            failing.remove(&component);
        }
    }

    /// A state store handle scoped to `component`'s namespace.
    #[must_use]
    pub fn state_store(self: &Arc<Self>, component: ComponentId) -> InMemoryStateStore {
        InMemoryStateStore {
            ledger: Arc::clone(self),
            component,
        }
    }

    /// A private data store handle.
    #[must_use]
    pub fn private_store(self: &Arc<Self>) -> InMemoryPartitionStore {
        InMemoryPartitionStore {
            ledger: Arc::clone(self),
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ComponentInvoker for InMemoryLedger {
    async fn invoke(
        &self,
        target: ComponentId,
        invocation: Invocation,
    ) -> Result<ComponentResponse, LedgerError> {
        let handler = {
            let handlers = self.handlers.read();
            handlers.get(&target).cloned()
        };
        let Some(handler) = handler else {
            return Err(LedgerError::Call {
                target,
                reason: "no handler registered".to_string(),
            });
        };

        debug!(
            target = %target,
            function = %invocation.function,
            correlation_id = %invocation.correlation_id,
            "[ledger] routing invocation"
        );
        Ok(handler.handle(invocation).await)
    }
}

#[async_trait]
impl EventEmitter for InMemoryLedger {
    async fn emit(&self, event: InterledgerEvent) -> usize {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);

        let name = event.name();
        let nonce = event.nonce();
        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    event = name,
                    nonce,
                    receivers = receiver_count,
                    "[ledger] event emitted"
                );
                receiver_count
            }
            Err(_) => {
                // No receivers; the acknowledgement is dropped.
                warn!(event = name, nonce, "[ledger] event dropped (no receivers)");
                0
            }
        }
    }

    fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }
}

/// State store handle scoped to one component's namespace.
pub struct InMemoryStateStore {
    ledger: Arc<InMemoryLedger>,
    component: ComponentId,
}

impl StateStore for InMemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let state = self.ledger.state.read();
        Ok(state.get(&(self.component, key.to_string())).cloned())
    }

    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), LedgerError> {
        if self.ledger.failing_state_puts.read().contains(&self.component) {
            return Err(LedgerError::Storage(format!(
                "injected state put failure for {}",
                self.component
            )));
        }
        let mut state = self.ledger.state.write();
        state.insert((self.component, key.to_string()), bytes);
        Ok(())
    }
}

/// Private partitioned store handle.
pub struct InMemoryPartitionStore {
    ledger: Arc<InMemoryLedger>,
}

impl PrivateDataStore for InMemoryPartitionStore {
    fn get_private(
        &self,
        partition: Partition,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        let private = self.ledger.private.read();
        Ok(private.get(&(partition, key.to_string())).cloned())
    }

    fn put_private(
        &self,
        partition: Partition,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<(), LedgerError> {
        if self.ledger.failing_private_puts.read().contains(&partition) {
            return Err(LedgerError::Storage(format!(
                "injected put failure in {}",
                partition.name()
            )));
        }
        let mut private = self.ledger.private.write();
        private.insert((partition, key.to_string()), bytes);
        Ok(())
    }

    fn delete_private(&self, partition: Partition, key: &str) -> Result<(), LedgerError> {
        let mut private = self.ledger.private.write();
        private.remove(&(partition, key.to_string()));
        Ok(())
    }
}
