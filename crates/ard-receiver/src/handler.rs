//! # Receiver Invocation Handler
//!
//! Boundary between the invocation transport and the receive pipeline.
//! The handler shares the service by `Arc` so the deploying harness can
//! keep a handle on the same instance it registers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use shared_ledger::{ComponentHandler, StateStore};
use shared_types::{ComponentId, ComponentResponse, Invocation, LedgerError};

use crate::commands::ReceiverCommand;
use crate::service::ReceiverService;

/// Handler registered for `ComponentId::Receiver`.
pub struct ReceiverHandler<S: StateStore> {
    service: Arc<ReceiverService<S>>,
}

impl<S: StateStore> ReceiverHandler<S> {
    /// Wraps a shared service for registration with the invoker.
    pub fn new(service: Arc<ReceiverService<S>>) -> Self {
        ReceiverHandler { service }
    }
}

#[async_trait]
impl<S: StateStore> ComponentHandler for ReceiverHandler<S> {
    fn component(&self) -> ComponentId {
        ComponentId::Receiver
    }

    async fn handle(&self, invocation: Invocation) -> ComponentResponse {
        debug!(
            function = %invocation.function,
            caller = %invocation.caller,
            correlation_id = %invocation.correlation_id,
            "[receiver] invocation received"
        );

        let command = match ReceiverCommand::parse(&invocation) {
            Ok(command) => command,
            Err(err) => {
                debug!(error = %err, "[receiver] invocation rejected at parse");
                return ComponentResponse::failure(err);
            }
        };

        match command {
            ReceiverCommand::InterledgerReceive { nonce, secret_data } => {
                let outcome = self
                    .service
                    .interledger_receive(nonce, &secret_data, invocation.correlation_id)
                    .await;
                match outcome {
                    Ok(outcome) => match serde_json::to_vec(&outcome) {
                        Ok(payload) => ComponentResponse::success(payload),
                        Err(err) => ComponentResponse::failure(LedgerError::Storage(format!(
                            "failed to encode response: {err}"
                        ))),
                    },
                    Err(err) => {
                        debug!(error = %err, "[receiver] invocation failed");
                        ComponentResponse::failure(err)
                    }
                }
            }
        }
    }
}
