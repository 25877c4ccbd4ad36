//! # Store Ports and Partition Policy
//!
//! The two storage surfaces a component sees: a component-scoped key-value
//! state store, and the private partitioned store whose read visibility is
//! decided per partition.
//!
//! Partition membership enforcement belongs to the platform's access
//! control layer. Components only pick the correct partition per write and
//! consult the reader policy before serving a read.

use shared_types::{LedgerError, OrgId};

/// A private data partition with its own reader population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Vendor-visible vulnerability records and their indexes.
    VendorRecords,
    /// Authority-only private details (researcher contact data).
    AuthorityDetails,
}

impl Partition {
    /// Platform name of the backing collection.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Partition::VendorRecords => "collectionVulnerability",
            Partition::AuthorityDetails => "collectionVulnerabilityPrivateDetails",
        }
    }

    /// The organizations allowed to read from this partition.
    ///
    /// This is the single policy table for tier visibility. Write-side
    /// enforcement stays with the platform.
    #[must_use]
    pub fn allowed_readers(&self) -> &'static [OrgId] {
        match self {
            Partition::VendorRecords => &[OrgId::Vendor, OrgId::Authority],
            Partition::AuthorityDetails => &[OrgId::Authority],
        }
    }

    /// Returns true if `org` may read from this partition.
    #[must_use]
    pub fn may_read(&self, org: OrgId) -> bool {
        self.allowed_readers().contains(&org)
    }
}

/// Component-scoped key-value state, used for the receiver's item log.
///
/// Implementations are pre-scoped to one component's namespace; keys do not
/// leak across components.
pub trait StateStore: Send + Sync {
    /// Reads the bytes stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Stores `bytes` under `key`, replacing any previous value.
    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), LedgerError>;
}

/// The private partitioned store backing both record tiers.
pub trait PrivateDataStore: Send + Sync {
    /// Reads the bytes stored under `key` in `partition`, if any.
    fn get_private(&self, partition: Partition, key: &str)
        -> Result<Option<Vec<u8>>, LedgerError>;

    /// Stores `bytes` under `key` in `partition`, replacing any previous
    /// value.
    fn put_private(
        &self,
        partition: Partition,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<(), LedgerError>;

    /// Removes the value under `key` in `partition`. Removing an absent key
    /// is not an error. Needed by the compensating rollback in the create
    /// path.
    fn delete_private(&self, partition: Partition, key: &str) -> Result<(), LedgerError>;
}
