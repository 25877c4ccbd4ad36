//! # Delivery Flow Properties
//!
//! Per-property checks of the receive pipeline against a mock registry:
//! acknowledgement exactness, log discipline under rejection, dedup under
//! redelivery storms, and the persisted-before-emitted ordering contract.

// =============================================================================
// TEST FIXTURES (only compiled during tests)
// =============================================================================

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use ard_receiver::{MockRegistryClient, ReceiverService};

#[cfg(test)]
use shared_ledger::{InMemoryLedger, InMemoryStateStore, StateStore};

#[cfg(test)]
use shared_types::{
    ComponentId, PatchState, PaymentState, Severity, VulnerabilityRecord,
};

#[cfg(test)]
struct DeliveryRig {
    ledger: Arc<InMemoryLedger>,
    registry: Arc<MockRegistryClient>,
    receiver: Arc<ReceiverService<InMemoryStateStore>>,
}

#[cfg(test)]
fn create_test_rig() -> DeliveryRig {
    crate::init_tracing();

    let ledger = Arc::new(InMemoryLedger::new());
    let registry = Arc::new(MockRegistryClient::new());
    let receiver = Arc::new(
        ReceiverService::new(
            ledger.state_store(ComponentId::Receiver),
            registry.clone(),
            ledger.clone(),
        )
        .expect("fresh receiver state"),
    );
    DeliveryRig {
        ledger,
        registry,
        receiver,
    }
}

#[cfg(test)]
fn register(registry: &MockRegistryClient, vulnerability_id: &str) {
    registry.insert_record(VulnerabilityRecord {
        vendor_id: "V1".to_string(),
        vulnerability_id: vulnerability_id.to_string(),
        vendor_name: "Acme".to_string(),
        product_name: "Widget".to_string(),
        vulnerability_type: "heap-overflow".to_string(),
        vulnerability_severity: Severity::Critical,
        patch_state: PatchState::Patched,
        payment_state: PaymentState::Paid,
        grace_period: 30.0,
        bounty_amt: 2500.0,
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use ard_receiver::{DeliveryOutcome, SecretDataLog};
    use rand::seq::SliceRandom;
    use rand::Rng;
    use shared_ledger::EventEmitter;
    use shared_types::{InterledgerEvent, SecretDataItem};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_acceptance_appends_exactly_one_item_and_one_event() {
        let rig = create_test_rig();
        register(&rig.registry, "CVE-1");
        let mut events = rig.ledger.subscribe();

        let outcome = rig
            .receiver
            .interledger_receive(41, "CVE-1", Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Accepted);

        assert_eq!(rig.receiver.items(), vec![SecretDataItem::new(41, "CVE-1")]);
        let event = events.recv().await.unwrap();
        assert_eq!(event, InterledgerEvent::Accepted { nonce: 41 });
        assert!(events.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_rejection_leaves_log_length_unchanged() {
        let rig = create_test_rig();
        register(&rig.registry, "CVE-1");
        rig.receiver
            .interledger_receive(1, "CVE-1", Uuid::new_v4())
            .await
            .unwrap();

        let length_before = rig.receiver.item_count();
        let mut events = rig.ledger.subscribe();

        let outcome = rig
            .receiver
            .interledger_receive(2, "CVE-404", Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Rejected);
        assert_eq!(rig.receiver.item_count(), length_before);
        assert_eq!(
            events.drain(),
            vec![InterledgerEvent::Rejected { nonce: 2 }]
        );
    }

    #[tokio::test]
    async fn test_event_arrives_only_after_the_item_is_durable() {
        let rig = create_test_rig();
        register(&rig.registry, "CVE-1");
        let mut events = rig.ledger.subscribe();

        rig.receiver
            .interledger_receive(5, "CVE-1", Uuid::new_v4())
            .await
            .unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event, InterledgerEvent::Accepted { nonce: 5 });

        // An observer reacting to the event finds the item already in the
        // persisted log, not only in the service's memory.
        let store = rig.ledger.state_store(ComponentId::Receiver);
        let persisted = SecretDataLog::from_bytes(store.get("items").unwrap().as_deref()).unwrap();
        assert!(persisted.contains(5));
        assert_eq!(persisted.items(), &[SecretDataItem::new(5, "CVE-1")]);
    }

    #[tokio::test]
    async fn test_redelivery_storm_settles_to_one_item_per_nonce() {
        let rig = create_test_rig();
        register(&rig.registry, "CVE-1");

        let mut rng = rand::thread_rng();
        let nonces: Vec<u64> = (0..20).map(|i| i * 1_000 + rng.gen_range(0..1_000)).collect();

        // Deliver every nonce once, then redeliver all of them in an
        // arbitrary order, twice.
        for &nonce in &nonces {
            let outcome = rig
                .receiver
                .interledger_receive(nonce, "CVE-1", Uuid::new_v4())
                .await
                .unwrap();
            assert_eq!(outcome, DeliveryOutcome::Accepted);
        }
        for _ in 0..2 {
            let mut replay = nonces.clone();
            replay.shuffle(&mut rng);
            for nonce in replay {
                let outcome = rig
                    .receiver
                    .interledger_receive(nonce, "CVE-1", Uuid::new_v4())
                    .await
                    .unwrap();
                assert_eq!(outcome, DeliveryOutcome::AlreadyDelivered);
            }
        }

        assert_eq!(rig.receiver.item_count(), nonces.len());
        assert_eq!(rig.ledger.events_emitted(), nonces.len() as u64);
        assert_eq!(rig.registry.calls(), nonces.len() as u64);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_deliveries_store_one_item() {
        let rig = create_test_rig();
        register(&rig.registry, "CVE-1");

        let (first, second) = tokio::join!(
            rig.receiver.interledger_receive(7, "CVE-1", Uuid::new_v4()),
            rig.receiver.interledger_receive(7, "CVE-1", Uuid::new_v4()),
        );
        let outcomes = [first.unwrap(), second.unwrap()];

        assert!(outcomes.iter().all(DeliveryOutcome::is_delivered));
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| **o == DeliveryOutcome::Accepted)
                .count(),
            1
        );
        assert_eq!(rig.receiver.item_count(), 1);
        assert_eq!(rig.ledger.events_emitted(), 1);
    }

    #[tokio::test]
    async fn test_binary_payloads_travel_in_printable_form() {
        let rig = create_test_rig();
        // The sending side registers the disclosure under the printable
        // form of its binary reference.
        let reference = hex::encode(b"poc-artifact-v2");
        register(&rig.registry, &reference);

        let outcome = rig
            .receiver
            .interledger_receive(11, &reference, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Accepted);

        let items = rig.receiver.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].secret_data, reference);
        assert_eq!(hex::decode(&items[0].secret_data).unwrap(), b"poc-artifact-v2");
    }

    #[tokio::test]
    async fn test_transport_failure_and_recovery_under_one_nonce() {
        let rig = create_test_rig();
        register(&rig.registry, "CVE-1");
        let mut events = rig.ledger.subscribe();

        rig.registry.set_should_fail(true);
        let outcome = rig
            .receiver
            .interledger_receive(3, "CVE-1", Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Rejected);

        // The external sender redelivers the same nonce once the registry
        // is reachable again; the rejection did not consume it.
        rig.registry.set_should_fail(false);
        let outcome = rig
            .receiver
            .interledger_receive(3, "CVE-1", Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Accepted);

        assert_eq!(
            events.drain(),
            vec![
                InterledgerEvent::Rejected { nonce: 3 },
                InterledgerEvent::Accepted { nonce: 3 },
            ]
        );
    }
}
