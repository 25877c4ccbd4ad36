//! # Registry Client Port
//!
//! The receiver never reads the registry's partitions directly; its only
//! view of the registry is this client capability, injected at
//! construction. Tests substitute the mock, production wires the
//! invocation-backed adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use shared_types::{ComponentId, LedgerError, VulnerabilityRecord};

/// Synchronous validation lookup against the registry.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Resolves a vendor-tier record by composite key or bare
    /// vulnerability id, with no side effects.
    ///
    /// `correlation_id` is the inbound delivery's id, threaded through so
    /// both components log the same call under one identifier.
    async fn read_vulnerability(
        &self,
        key: &str,
        correlation_id: Uuid,
    ) -> Result<VulnerabilityRecord, LedgerError>;
}

/// In-memory registry stand-in for receiver tests.
pub struct MockRegistryClient {
    records: RwLock<HashMap<String, VulnerabilityRecord>>,
    should_fail: RwLock<bool>,
    calls: AtomicU64,
}

impl MockRegistryClient {
    /// A mock with no records and no injected failure.
    #[must_use]
    pub fn new() -> Self {
        MockRegistryClient {
            records: RwLock::new(HashMap::new()),
            should_fail: RwLock::new(false),
            calls: AtomicU64::new(0),
        }
    }

    /// Makes the record resolvable by its bare vulnerability id.
    pub fn insert_record(&self, record: VulnerabilityRecord) {
        self.records
            .write()
            .insert(record.vulnerability_id.clone(), record);
    }

    /// Makes every lookup fail with a transport-level `Call` error.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write() = fail;
    }

    /// Number of lookups performed, for asserting that redelivery skips
    /// the registry.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for MockRegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryClient for MockRegistryClient {
    async fn read_vulnerability(
        &self,
        key: &str,
        _correlation_id: Uuid,
    ) -> Result<VulnerabilityRecord, LedgerError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if *self.should_fail.read() {
            return Err(LedgerError::Call {
                target: ComponentId::Registry,
                reason: "injected transport failure".to_string(),
            });
        }

        self.records
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("vulnerability {key} is not registered")))
    }
}
