//! # End-to-End Disclosure Scenarios
//!
//! Tests the complete two-component flow through the invocation fabric:
//!
//! ```text
//! [harness] ──createVulnerability──▶ [Registry]
//!     │                                  ▲
//!     │ interledgerReceive               │ readVulnerability
//!     ▼                                  │
//! [Receiver] ────────────────────────────┘
//!     │
//!     └──▶ InterledgerEventAccepted / InterledgerEventRejected
//! ```
//!
//! Both handlers are registered with the in-memory ledger, so every hop
//! (delivery, validation call, acknowledgement event) crosses the same
//! ports a real deployment would.

// =============================================================================
// TEST FIXTURES (only compiled during tests)
// =============================================================================

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use ard_receiver::{
    DisclosurePolicy, InvokingRegistryClient, ReceiverHandler, ReceiverService,
};

#[cfg(test)]
use ard_registry::{RegistryHandler, RegistryService};

#[cfg(test)]
use shared_ledger::{
    ComponentInvoker, EventEmitter, EventSubscription, InMemoryLedger, InMemoryStateStore,
};

#[cfg(test)]
use shared_types::{ComponentId, ComponentResponse, Invocation, OrgId};

/// Both components wired through one in-memory ledger.
#[cfg(test)]
struct DisclosureHarness {
    ledger: Arc<InMemoryLedger>,
    receiver: Arc<ReceiverService<InMemoryStateStore>>,
}

#[cfg(test)]
impl DisclosureHarness {
    fn new() -> Self {
        Self::with_policy(Arc::new(ard_receiver::AcceptKnown))
    }

    fn with_policy(policy: Arc<dyn DisclosurePolicy>) -> Self {
        crate::init_tracing();

        let ledger = Arc::new(InMemoryLedger::new());
        ledger.register_handler(Arc::new(RegistryHandler::new(RegistryService::new(
            ledger.private_store(),
        ))));

        let registry_client = Arc::new(InvokingRegistryClient::new(
            ledger.clone() as Arc<dyn ComponentInvoker>
        ));
        let receiver = Arc::new(
            ReceiverService::new(
                ledger.state_store(ComponentId::Receiver),
                registry_client,
                ledger.clone(),
            )
            .expect("fresh receiver state")
            .with_policy(policy),
        );
        receiver.init().expect("seed item log");
        ledger.register_handler(Arc::new(ReceiverHandler::new(receiver.clone())));

        DisclosureHarness { ledger, receiver }
    }

    fn subscribe(&self) -> EventSubscription {
        self.ledger.subscribe()
    }

    async fn invoke_registry(
        &self,
        caller: OrgId,
        function: &str,
        args: &[&str],
    ) -> ComponentResponse {
        self.ledger
            .invoke(
                ComponentId::Registry,
                Invocation::new(caller, function, to_args(args)),
            )
            .await
            .expect("registry handler registered")
    }

    async fn create_vulnerability(&self, vendor_id: &str, vulnerability_id: &str) {
        let response = self
            .invoke_registry(
                OrgId::Vendor,
                "createVulnerability",
                &create_args(vendor_id, vulnerability_id),
            )
            .await;
        assert!(response.is_success(), "create failed: {response:?}");
    }

    async fn deliver(&self, nonce: u64, payload: &str) -> ComponentResponse {
        self.ledger
            .invoke(
                ComponentId::Receiver,
                Invocation::new(
                    OrgId::Interledger,
                    "interledgerReceive",
                    vec![nonce.to_string(), payload.to_string()],
                ),
            )
            .await
            .expect("receiver handler registered")
    }
}

#[cfg(test)]
fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

#[cfg(test)]
fn create_args<'a>(vendor_id: &'a str, vulnerability_id: &'a str) -> Vec<&'a str> {
    vec![
        vendor_id,
        vulnerability_id,
        "Acme",
        "Widget",
        "buffer-overflow",
        "high",
        "unpatched",
        "pending",
        "90",
        "1000",
        "r@example.com",
    ]
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use ard_receiver::{DeliveryOutcome, RequirePatched};
    use shared_ledger::Partition;
    use shared_types::{
        InterledgerEvent, LedgerError, SecretDataItem, VulnerabilityPrivateDetail,
        VulnerabilityRecord,
    };

    #[tokio::test]
    async fn test_full_disclosure_scenario() {
        let harness = DisclosureHarness::new();
        harness.create_vulnerability("V1", "CVE-1").await;
        let mut events = harness.subscribe();

        // Known reference: accepted, logged, acknowledged.
        let response = harness.deliver(1, "CVE-1").await;
        let outcome: DeliveryOutcome =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        assert_eq!(outcome, DeliveryOutcome::Accepted);
        assert_eq!(
            harness.receiver.items(),
            vec![SecretDataItem::new(1, "CVE-1")]
        );

        // Unknown reference: rejected, log unchanged.
        let response = harness.deliver(2, "CVE-999").await;
        let outcome: DeliveryOutcome =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        assert_eq!(outcome, DeliveryOutcome::Rejected);
        assert_eq!(
            harness.receiver.items(),
            vec![SecretDataItem::new(1, "CVE-1")]
        );

        assert_eq!(
            events.drain(),
            vec![
                InterledgerEvent::Accepted { nonce: 1 },
                InterledgerEvent::Rejected { nonce: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn test_composite_keys_keep_one_vendors_records_distinct() {
        let harness = DisclosureHarness::new();
        harness.create_vulnerability("V1", "CVE-1").await;
        harness.create_vulnerability("V1", "CVE-2").await;

        let response = harness
            .invoke_registry(OrgId::Vendor, "getVendorHistory", &["V1"])
            .await;
        let history: Vec<VulnerabilityRecord> =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        let ids: Vec<&str> = history.iter().map(|r| r.vulnerability_id.as_str()).collect();
        assert_eq!(ids, vec!["CVE-1", "CVE-2"]);

        // Both remain independently resolvable by the receiver's path.
        for (nonce, id) in [(1, "CVE-1"), (2, "CVE-2")] {
            let response = harness.deliver(nonce, id).await;
            let outcome: DeliveryOutcome =
                serde_json::from_slice(&response.into_result().unwrap()).unwrap();
            assert_eq!(outcome, DeliveryOutcome::Accepted);
        }
    }

    #[tokio::test]
    async fn test_researcher_contact_is_tiered() {
        let harness = DisclosureHarness::new();
        harness.create_vulnerability("V1", "CVE-1").await;

        let response = harness
            .invoke_registry(OrgId::Authority, "getResearcherContact", &["CVE-1"])
            .await;
        let detail: VulnerabilityPrivateDetail =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        assert_eq!(detail.researcher_contact, "r@example.com");

        let response = harness
            .invoke_registry(OrgId::Vendor, "getResearcherContact", &["CVE-1"])
            .await;
        assert!(matches!(
            response.into_result().unwrap_err(),
            LedgerError::Permission {
                org: OrgId::Vendor,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_duplicate_delivery_through_the_full_stack() {
        let harness = DisclosureHarness::new();
        harness.create_vulnerability("V1", "CVE-1").await;

        let first = harness.deliver(7, "CVE-1").await;
        let second = harness.deliver(7, "CVE-1").await;

        let first: DeliveryOutcome =
            serde_json::from_slice(&first.into_result().unwrap()).unwrap();
        let second: DeliveryOutcome =
            serde_json::from_slice(&second.into_result().unwrap()).unwrap();
        assert_eq!(first, DeliveryOutcome::Accepted);
        assert_eq!(second, DeliveryOutcome::AlreadyDelivered);

        // Exactly one stored item and one emitted event for nonce 7.
        assert_eq!(harness.receiver.item_count(), 1);
        assert_eq!(harness.ledger.events_emitted(), 1);
    }

    #[tokio::test]
    async fn test_create_rollback_is_invisible_to_both_components() {
        let harness = DisclosureHarness::new();
        harness
            .ledger
            .set_fail_private_puts(Partition::AuthorityDetails, true);

        let response = harness
            .invoke_registry(
                OrgId::Vendor,
                "createVulnerability",
                &create_args("V1", "CVE-1"),
            )
            .await;
        assert!(matches!(
            response.into_result().unwrap_err(),
            LedgerError::Storage(_)
        ));

        // No vendor-tier record survived, so a delivery referencing it is
        // rejected rather than accepted against half-written state.
        let response = harness
            .invoke_registry(OrgId::Vendor, "getVendorHistory", &["V1"])
            .await;
        assert!(response.into_result().unwrap_err().is_not_found());

        let response = harness.deliver(1, "CVE-1").await;
        let outcome: DeliveryOutcome =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        assert_eq!(outcome, DeliveryOutcome::Rejected);

        // Once writes heal the same create succeeds end to end.
        harness
            .ledger
            .set_fail_private_puts(Partition::AuthorityDetails, false);
        harness.create_vulnerability("V1", "CVE-1").await;
        let response = harness.deliver(2, "CVE-1").await;
        let outcome: DeliveryOutcome =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        assert_eq!(outcome, DeliveryOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_policy_gate_opens_after_status_update() {
        let harness = DisclosureHarness::with_policy(Arc::new(RequirePatched));
        harness.create_vulnerability("V1", "CVE-1").await;

        // Unpatched: the gate holds, the nonce is not burned.
        let response = harness.deliver(1, "CVE-1").await;
        let outcome: DeliveryOutcome =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        assert_eq!(outcome, DeliveryOutcome::Rejected);
        assert!(harness.receiver.items().is_empty());

        let response = harness
            .invoke_registry(
                OrgId::Vendor,
                "updateVulnerabilityStatus",
                &["V1", "CVE-1", "patched", "paid"],
            )
            .await;
        assert!(response.is_success());

        // The sender redelivers under the same nonce and now gets through.
        let response = harness.deliver(1, "CVE-1").await;
        let outcome: DeliveryOutcome =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        assert_eq!(outcome, DeliveryOutcome::Accepted);
        assert_eq!(
            harness.receiver.items(),
            vec![SecretDataItem::new(1, "CVE-1")]
        );
    }

    #[tokio::test]
    async fn test_payment_details_projection_over_the_wire() {
        let harness = DisclosureHarness::new();
        harness.create_vulnerability("V1", "CVE-1").await;

        let response = harness
            .invoke_registry(OrgId::Authority, "getPaymentDetails", &["V1", "CVE-1"])
            .await;
        let details: serde_json::Value =
            serde_json::from_slice(&response.into_result().unwrap()).unwrap();
        assert_eq!(details["vendorId"], "V1");
        assert_eq!(details["paymentState"], "pending");
        assert_eq!(details["bountyAmt"], 1000.0);
        // The projection never carries authority-tier fields.
        assert!(details.get("researcherContact").is_none());
    }

    #[tokio::test]
    async fn test_unknown_functions_fail_explicitly_on_both_components() {
        let harness = DisclosureHarness::new();

        let response = harness
            .invoke_registry(OrgId::Vendor, "createVulnerabilty", &[])
            .await;
        assert_eq!(
            response.into_result().unwrap_err(),
            LedgerError::UnknownFunction("createVulnerabilty".to_string())
        );

        let response = harness
            .ledger
            .invoke(
                ComponentId::Receiver,
                Invocation::new(OrgId::Interledger, "interledgerRecv", vec![]),
            )
            .await
            .unwrap();
        assert_eq!(
            response.into_result().unwrap_err(),
            LedgerError::UnknownFunction("interledgerRecv".to_string())
        );
    }
}
