//! # Receiver Service
//!
//! Drives one delivery at a time through the receive pipeline: nonce
//! dedup, registry validation, policy decision, durable append, event.
//! The event for an outcome is emitted only after the log reflects it, so
//! an observer seeing the acknowledgement may trust the log.
//!
//! A failed registry call is a rejection, not an error: retrying is the
//! external sender's job, and it redelivers under the same nonce, which
//! is why the dedup check comes first.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_ledger::{EventEmitter, StateStore};
use shared_types::{InterledgerEvent, LedgerError, SecretDataItem};

use crate::domain::log::{SecretDataLog, ITEMS_KEY};
use crate::policy::{AcceptKnown, DisclosurePolicy};
use crate::ports::RegistryClient;

/// Terminal outcome of one delivery attempt.
///
/// All three are successful completions of the receive operation; only
/// the first two are accompanied by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryOutcome {
    /// Validated, persisted, and acknowledged with the acceptance event.
    Accepted,
    /// Not accepted; acknowledged with the rejection event.
    Rejected,
    /// The nonce was already in the log; nothing changed, nothing emitted.
    AlreadyDelivered,
}

impl DeliveryOutcome {
    /// Returns true if the delivery's item is in the log, whether from
    /// this attempt or an earlier one.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(
            self,
            DeliveryOutcome::Accepted | DeliveryOutcome::AlreadyDelivered
        )
    }
}

/// The receiver component's operations over its state store.
pub struct ReceiverService<S: StateStore> {
    store: S,
    registry: Arc<dyn RegistryClient>,
    emitter: Arc<dyn EventEmitter>,
    policy: Arc<dyn DisclosurePolicy>,
    log: Mutex<SecretDataLog>,
}

impl<S: StateStore> ReceiverService<S> {
    /// Creates a service with the default accept-if-known policy,
    /// rebuilding the nonce index from the persisted log.
    pub fn new(
        store: S,
        registry: Arc<dyn RegistryClient>,
        emitter: Arc<dyn EventEmitter>,
    ) -> Result<Self, LedgerError> {
        let log = SecretDataLog::from_bytes(store.get(ITEMS_KEY)?.as_deref())?;
        Ok(ReceiverService {
            store,
            registry,
            emitter,
            policy: Arc::new(AcceptKnown),
            log: Mutex::new(log),
        })
    }

    /// Replaces the disclosure policy. Construction-time only; the policy
    /// of a running component does not change between deliveries.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn DisclosurePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Seeds the empty item log on first deployment.
    ///
    /// Idempotent: an existing log, empty or not, is left untouched, so
    /// re-running init on upgrade never wipes accepted items.
    pub fn init(&self) -> Result<(), LedgerError> {
        if self.store.get(ITEMS_KEY)?.is_some() {
            debug!("[receiver] init: item log already present");
            return Ok(());
        }
        self.store.put(ITEMS_KEY, self.log.lock().to_bytes()?)?;
        info!("[receiver] item log initialized");
        Ok(())
    }

    /// Processes one interledger delivery to its terminal outcome.
    pub async fn interledger_receive(
        &self,
        nonce: u64,
        secret_data: &str,
        correlation_id: Uuid,
    ) -> Result<DeliveryOutcome, LedgerError> {
        if self.log.lock().contains(nonce) {
            debug!(
                nonce,
                correlation_id = %correlation_id,
                "[receiver] redelivery of a seen nonce, answering from the log"
            );
            return Ok(DeliveryOutcome::AlreadyDelivered);
        }

        let record = match self
            .registry
            .read_vulnerability(secret_data, correlation_id)
            .await
        {
            Ok(record) => record,
            Err(err) => {
                info!(
                    nonce,
                    error = %err,
                    "[receiver] delivery rejected: validation did not resolve a record"
                );
                return self.reject(nonce).await;
            }
        };

        if !self.policy.permit(&record) {
            info!(
                nonce,
                vulnerability_id = record.vulnerability_id.as_str(),
                policy = self.policy.name(),
                "[receiver] delivery rejected by disclosure policy"
            );
            return self.reject(nonce).await;
        }

        let item = SecretDataItem::new(nonce, secret_data);
        {
            let mut log = self.log.lock();
            // A racing duplicate that got past the first check loses here.
            if log.contains(nonce) {
                return Ok(DeliveryOutcome::AlreadyDelivered);
            }
            let staged = log.encoded_with(&item)?;
            if let Err(err) = self.store.put(ITEMS_KEY, staged) {
                warn!(nonce, error = %err, "[receiver] item log write failed");
                return Err(err);
            }
            log.append(item)?;
        }

        info!(
            nonce,
            vulnerability_id = record.vulnerability_id.as_str(),
            "[receiver] delivery accepted"
        );
        self.emitter
            .emit(InterledgerEvent::Accepted { nonce })
            .await;
        Ok(DeliveryOutcome::Accepted)
    }

    /// The accepted items, in acceptance order.
    #[must_use]
    pub fn items(&self) -> Vec<SecretDataItem> {
        self.log.lock().items().to_vec()
    }

    /// Number of accepted items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.log.lock().len()
    }

    async fn reject(&self, nonce: u64) -> Result<DeliveryOutcome, LedgerError> {
        self.emitter
            .emit(InterledgerEvent::Rejected { nonce })
            .await;
        Ok(DeliveryOutcome::Rejected)
    }
}
