//! # Cross-Component Invocation Ports
//!
//! Defines the handler side (a component receiving an invocation) and the
//! caller side (a component or harness issuing one). Handlers are
//! registered once at startup; function-name dispatch happens inside the
//! handler against a typed command enum.

use async_trait::async_trait;
use shared_types::{ComponentId, ComponentResponse, Invocation, LedgerError};

/// A component's entry point for transaction-style invocations.
///
/// Implementations parse the invocation into a typed command, execute it,
/// and report the outcome as an explicit success or failure response.
/// Errors never escape as panics or as bare payload bytes.
#[async_trait]
pub trait ComponentHandler: Send + Sync {
    /// The component this handler serves.
    fn component(&self) -> ComponentId;

    /// Handles one invocation to completion.
    async fn handle(&self, invocation: Invocation) -> ComponentResponse;
}

/// Caller-side port for synchronous cross-component calls.
///
/// The call is synchronous from the caller's perspective: it resolves to a
/// response or a `CallError`, never to a partially-completed state. The
/// receiver holds this as an injected capability, which is what lets tests
/// substitute a fake registry.
#[async_trait]
pub trait ComponentInvoker: Send + Sync {
    /// Routes `invocation` to the handler registered for `target`.
    ///
    /// Returns `LedgerError::Call` if no handler is registered for the
    /// target. A handler-level failure is not a transport error; it comes
    /// back inside the `ComponentResponse`.
    async fn invoke(
        &self,
        target: ComponentId,
        invocation: Invocation,
    ) -> Result<ComponentResponse, LedgerError>;
}
