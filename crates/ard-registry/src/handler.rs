//! # Registry Invocation Handler
//!
//! Boundary between the invocation transport and the service. Parses the
//! typed command, applies the tier read policy against the caller's org,
//! runs the operation, and encodes the outcome as an explicit response.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use shared_ledger::{ComponentHandler, Partition, PrivateDataStore};
use shared_types::{ComponentId, ComponentResponse, Invocation, LedgerError};

use crate::commands::RegistryCommand;
use crate::service::RegistryService;

/// Handler registered for `ComponentId::Registry`.
pub struct RegistryHandler<P: PrivateDataStore> {
    service: RegistryService<P>,
}

impl<P: PrivateDataStore> RegistryHandler<P> {
    /// Wraps a service for registration with the invoker.
    pub fn new(service: RegistryService<P>) -> Self {
        RegistryHandler { service }
    }

    fn execute(&self, command: RegistryCommand) -> Result<Vec<u8>, LedgerError> {
        match command {
            RegistryCommand::CreateVulnerability(params) => {
                encode_payload(&self.service.create_vulnerability(params)?)
            }
            RegistryCommand::GetVendorHistory { vendor_id } => {
                encode_payload(&self.service.get_vendor_history(&vendor_id)?)
            }
            RegistryCommand::GetResearcherContact { vulnerability_id } => {
                encode_payload(&self.service.get_researcher_contact(&vulnerability_id)?)
            }
            RegistryCommand::ReadVulnerability { key } => {
                encode_payload(&self.service.read_vulnerability(&key)?)
            }
            RegistryCommand::UpdateVulnerabilityStatus {
                vendor_id,
                vulnerability_id,
                patch_state,
                payment_state,
            } => encode_payload(&self.service.update_vulnerability_status(
                &vendor_id,
                &vulnerability_id,
                patch_state,
                payment_state,
            )?),
            RegistryCommand::GetPaymentDetails {
                vendor_id,
                vulnerability_id,
            } => encode_payload(
                &self
                    .service
                    .get_payment_details(&vendor_id, &vulnerability_id)?,
            ),
        }
    }
}

/// The partition a command reads from, when tier visibility applies.
///
/// `readVulnerability` is the cross-component validation entry and runs
/// under the callee's own partition membership, so it carries no caller
/// check. Write-side enforcement belongs to the platform.
fn required_read_partition(command: &RegistryCommand) -> Option<Partition> {
    match command {
        RegistryCommand::GetVendorHistory { .. } | RegistryCommand::GetPaymentDetails { .. } => {
            Some(Partition::VendorRecords)
        }
        RegistryCommand::GetResearcherContact { .. } => Some(Partition::AuthorityDetails),
        RegistryCommand::CreateVulnerability(_)
        | RegistryCommand::ReadVulnerability { .. }
        | RegistryCommand::UpdateVulnerabilityStatus { .. } => None,
    }
}

#[async_trait]
impl<P: PrivateDataStore> ComponentHandler for RegistryHandler<P> {
    fn component(&self) -> ComponentId {
        ComponentId::Registry
    }

    async fn handle(&self, invocation: Invocation) -> ComponentResponse {
        debug!(
            function = %invocation.function,
            caller = %invocation.caller,
            correlation_id = %invocation.correlation_id,
            "[registry] invocation received"
        );

        let command = match RegistryCommand::parse(&invocation) {
            Ok(command) => command,
            Err(err) => {
                debug!(error = %err, "[registry] invocation rejected at parse");
                return ComponentResponse::failure(err);
            }
        };

        if let Some(partition) = required_read_partition(&command) {
            if !partition.may_read(invocation.caller) {
                warn!(
                    function = command.function_name(),
                    caller = %invocation.caller,
                    partition = partition.name(),
                    "[registry] caller lacks tier visibility"
                );
                return ComponentResponse::failure(LedgerError::Permission {
                    org: invocation.caller,
                    operation: command.function_name().to_string(),
                });
            }
        }

        match self.execute(command) {
            Ok(payload) => ComponentResponse::success(payload),
            Err(err) => {
                debug!(error = %err, "[registry] invocation failed");
                ComponentResponse::failure(err)
            }
        }
    }
}

fn encode_payload<T: Serialize>(value: &T) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(value)
        .map_err(|err| LedgerError::Storage(format!("failed to encode response: {err}")))
}
