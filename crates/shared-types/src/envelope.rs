//! # `Invocation` Envelope
//!
//! The wrapper for every transaction-style call into a component, whether it
//! arrives from the platform boundary or from the other component.
//!
//! ## Properties
//!
//! - **Correlation**: every invocation carries a `correlation_id` that flows
//!   into logs on both sides of a cross-component call.
//! - **Envelope Authority**: `caller` is the sole source of truth for the
//!   calling organization; argument payloads never duplicate it.
//! - **Explicit Status**: responses distinguish success from failure as an
//!   enum variant, never as a sentinel payload.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// Organization on whose behalf an invocation executes.
///
/// Read visibility of the private data tiers is decided against this
/// identity. The platform's membership layer authenticates it; components
/// only consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgId {
    /// The vendor organization whose products the records concern.
    Vendor,
    /// The disclosure authority overseeing the process.
    Authority,
    /// The interledger bridge identity used for cross-component calls.
    Interledger,
}

impl OrgId {
    /// Stable lowercase name used in logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgId::Vendor => "vendor",
            OrgId::Authority => "authority",
            OrgId::Interledger => "interledger",
        }
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addressable ledger component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentId {
    /// The vulnerability registry.
    Registry,
    /// The interledger secret receiver.
    Receiver,
}

impl ComponentId {
    /// Stable lowercase name used in logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::Registry => "registry",
            ComponentId::Receiver => "receiver",
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction-style call into a component.
///
/// Arguments are positional strings, matching the platform's invocation
/// transport. Components parse them into typed commands before touching
/// any state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    /// Organization the platform authenticated as the caller.
    pub caller: OrgId,
    /// Function name to dispatch on.
    pub function: String,
    /// Positional string arguments.
    pub args: Vec<String>,
    /// Identifier correlating this call across component logs.
    pub correlation_id: Uuid,
}

impl Invocation {
    /// Creates an invocation with a freshly generated correlation id.
    #[must_use]
    pub fn new(caller: OrgId, function: impl Into<String>, args: Vec<String>) -> Self {
        Invocation {
            caller,
            function: function.into(),
            args,
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Replaces the correlation id, for flows that thread an existing id
    /// through a nested call.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }
}

/// Outcome of an invocation, as seen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ComponentResponse {
    /// The operation succeeded; `payload` carries its JSON-encoded result.
    Success { payload: Vec<u8> },
    /// The operation failed with a typed error.
    Failure { error: LedgerError },
}

impl ComponentResponse {
    /// Wraps a result payload.
    #[must_use]
    pub fn success(payload: Vec<u8>) -> Self {
        ComponentResponse::Success { payload }
    }

    /// Wraps a typed error.
    #[must_use]
    pub fn failure(error: LedgerError) -> Self {
        ComponentResponse::Failure { error }
    }

    /// Returns true if this is a success response.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ComponentResponse::Success { .. })
    }

    /// Converts the response into a `Result` over the raw payload.
    pub fn into_result(self) -> Result<Vec<u8>, LedgerError> {
        match self {
            ComponentResponse::Success { payload } => Ok(payload),
            ComponentResponse::Failure { error } => Err(error),
        }
    }
}
