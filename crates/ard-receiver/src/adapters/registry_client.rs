//! # Invocation-Backed Registry Client
//!
//! Implements the registry client port over the cross-component invoker:
//! one `readVulnerability` invocation per lookup, issued under the
//! interledger org identity with the delivery's correlation id threaded
//! through. Transport failures and undecodable payloads both surface as
//! `Call` errors; a registry-side failure comes back as the registry's own
//! typed error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use shared_ledger::ComponentInvoker;
use shared_types::{ComponentId, Invocation, LedgerError, OrgId, VulnerabilityRecord};

use crate::ports::RegistryClient;

/// Function name of the registry's validation entry point.
const READ_VULNERABILITY: &str = "readVulnerability";

/// Registry client routed through the ledger's invocation port.
pub struct InvokingRegistryClient {
    invoker: Arc<dyn ComponentInvoker>,
}

impl InvokingRegistryClient {
    /// Wraps the invoker the platform registered handlers with.
    pub fn new(invoker: Arc<dyn ComponentInvoker>) -> Self {
        InvokingRegistryClient { invoker }
    }
}

#[async_trait]
impl RegistryClient for InvokingRegistryClient {
    async fn read_vulnerability(
        &self,
        key: &str,
        correlation_id: Uuid,
    ) -> Result<VulnerabilityRecord, LedgerError> {
        let invocation = Invocation::new(
            OrgId::Interledger,
            READ_VULNERABILITY,
            vec![key.to_string()],
        )
        .with_correlation_id(correlation_id);

        debug!(
            key,
            correlation_id = %correlation_id,
            "[receiver] validating delivery against the registry"
        );

        let response = self
            .invoker
            .invoke(ComponentId::Registry, invocation)
            .await?;
        let payload = response.into_result()?;

        serde_json::from_slice(&payload).map_err(|err| LedgerError::Call {
            target: ComponentId::Registry,
            reason: format!("undecodable readVulnerability payload: {err}"),
        })
    }
}
