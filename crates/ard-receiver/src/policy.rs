//! # Disclosure Policy
//!
//! The decision point between "the registry knows this vulnerability" and
//! "its payload may enter the log". Finer gating is deployment-specific,
//! so the predicate is a seam: the service takes any implementation at
//! construction and the default accepts every known record.

use shared_types::{PatchState, VulnerabilityRecord};

/// Decides whether a validated delivery may be accepted.
pub trait DisclosurePolicy: Send + Sync {
    /// Stable policy name for logs.
    fn name(&self) -> &'static str;

    /// Returns true if the delivery resolving to `record` may be accepted.
    fn permit(&self, record: &VulnerabilityRecord) -> bool;
}

/// Default policy: accept any delivery whose record exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptKnown;

impl DisclosurePolicy for AcceptKnown {
    fn name(&self) -> &'static str {
        "accept-known"
    }

    fn permit(&self, _record: &VulnerabilityRecord) -> bool {
        true
    }
}

/// Stricter policy: accept only once the vulnerability is patched.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequirePatched;

impl DisclosurePolicy for RequirePatched {
    fn name(&self) -> &'static str {
        "require-patched"
    }

    fn permit(&self, record: &VulnerabilityRecord) -> bool {
        record.patch_state == PatchState::Patched
    }
}
