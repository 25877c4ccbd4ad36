//! # Error Types
//!
//! Defines the error enum shared by both components. The enum is
//! serde-serializable so a failure crosses the invocation boundary without
//! collapsing into a bare message string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::envelope::{ComponentId, OrgId};

/// Errors surfaced by registry and receiver operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LedgerError {
    /// Malformed or out-of-range input, rejected before any state change.
    #[error("validation error: {0}")]
    Validation(String),

    /// Lookup on an id no record is stored under.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller's organization lacks visibility for the requested tier.
    #[error("permission denied: {operation} is not available to the {org} org")]
    Permission { org: OrgId, operation: String },

    /// Underlying state read or write failed. Also reported when a partial
    /// write was detected and rolled back.
    #[error("storage error: {0}")]
    Storage(String),

    /// Cross-component invocation failed or returned a non-success status.
    #[error("call to {target} failed: {reason}")]
    Call { target: ComponentId, reason: String },

    /// Dispatch received a function name no command maps to.
    #[error("invalid invoke function name: {0}")]
    UnknownFunction(String),
}

impl LedgerError {
    /// Returns true for errors that indicate the looked-up id is unknown,
    /// as opposed to the lookup itself failing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_))
    }
}
