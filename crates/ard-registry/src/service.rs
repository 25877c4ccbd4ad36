//! # Registry Service
//!
//! Owns both record tiers. The create path writes the vendor-tier record,
//! the two indexes, and the authority-tier detail as one logical unit:
//! every applied write is journaled, and a failure unwinds the journal
//! before the error reaches the caller, so a partial create is never
//! observable.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use shared_ledger::{Partition, PrivateDataStore};
use shared_types::{
    LedgerError, PatchState, PaymentDetails, PaymentState, VulnerabilityPrivateDetail,
    VulnerabilityRecord,
};

use crate::domain::keys::{vendor_index_key, vulnerability_index_key, LookupKey, RecordKey};
use crate::domain::params::CreateVulnerabilityParams;

/// The registry component's operations over a private partitioned store.
pub struct RegistryService<P: PrivateDataStore> {
    store: P,
    /// Serializes compound writes, mirroring the platform's per-key
    /// transaction isolation for the multi-key create and update paths.
    write_gate: Mutex<()>,
}

impl<P: PrivateDataStore> RegistryService<P> {
    /// Creates a service over the given store.
    pub fn new(store: P) -> Self {
        RegistryService {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// Creates a vulnerability record and its private detail atomically.
    ///
    /// Writes, in order: the record, the per-vendor index, the resolution
    /// index, the authority-tier detail. If any write fails the already
    /// applied ones are rolled back and the storage error is returned, so
    /// the outcome is both-or-neither.
    pub fn create_vulnerability(
        &self,
        params: CreateVulnerabilityParams,
    ) -> Result<VulnerabilityRecord, LedgerError> {
        let _gate = self.write_gate.lock();

        let record_key = params.key.storage_key();
        let vulnerability_id = params.key.vulnerability_id().to_string();
        let vendor_id = params.key.vendor_id().to_string();

        if self
            .store
            .get_private(Partition::VendorRecords, &record_key)?
            .is_some()
        {
            return Err(LedgerError::Validation(format!(
                "vulnerability {} already exists",
                params.key
            )));
        }
        // The detail tier and the resolution index are keyed by the bare
        // vulnerability id, so an id may not be reused across vendors.
        if self
            .store
            .get_private(Partition::AuthorityDetails, &vulnerability_id)?
            .is_some()
        {
            return Err(LedgerError::Validation(format!(
                "vulnerability id {vulnerability_id} is already registered"
            )));
        }

        let record = params.record();
        let detail = params.private_detail();

        let vendor_idx_key = vendor_index_key(&vendor_id);
        let prior_vendor_index = self
            .store
            .get_private(Partition::VendorRecords, &vendor_idx_key)?;
        let mut vendor_index: Vec<String> = match prior_vendor_index.as_deref() {
            Some(bytes) => decode(bytes, "vendor index")?,
            None => Vec::new(),
        };
        vendor_index.push(vulnerability_id.clone());

        let vuln_idx_key = vulnerability_index_key(&vulnerability_id);
        let prior_vuln_index = self
            .store
            .get_private(Partition::VendorRecords, &vuln_idx_key)?;

        let writes: Vec<(Partition, String, Vec<u8>, Option<Vec<u8>>)> = vec![
            (
                Partition::VendorRecords,
                record_key.clone(),
                encode(&record)?,
                None,
            ),
            (
                Partition::VendorRecords,
                vendor_idx_key,
                encode(&vendor_index)?,
                prior_vendor_index,
            ),
            (
                Partition::VendorRecords,
                vuln_idx_key,
                encode(&vendor_id)?,
                prior_vuln_index,
            ),
            (
                Partition::AuthorityDetails,
                vulnerability_id,
                encode(&detail)?,
                None,
            ),
        ];

        let mut undo = UndoLog::new();
        for (partition, key, bytes, prior) in writes {
            if let Err(err) = self.store.put_private(partition, &key, bytes) {
                warn!(
                    key = %key,
                    partition = partition.name(),
                    error = %err,
                    "[registry] write failed, rolling back create"
                );
                undo.unwind(&self.store);
                return Err(err);
            }
            undo.record(partition, key, prior);
        }

        info!(
            vendor_id = record.vendor_id.as_str(),
            vulnerability_id = record.vulnerability_id.as_str(),
            severity = %record.vulnerability_severity,
            "[registry] vulnerability created"
        );
        Ok(record)
    }

    /// All of a vendor's records, in creation order.
    pub fn get_vendor_history(&self, vendor_id: &str) -> Result<Vec<VulnerabilityRecord>, LedgerError> {
        if vendor_id.trim().is_empty() {
            return Err(LedgerError::Validation("vendorId must not be empty".to_string()));
        }

        let index_bytes = self
            .store
            .get_private(Partition::VendorRecords, &vendor_index_key(vendor_id))?
            .ok_or_else(|| {
                LedgerError::NotFound(format!("no vulnerabilities recorded for vendor {vendor_id}"))
            })?;
        let ids: Vec<String> = decode(&index_bytes, "vendor index")?;

        let mut records = Vec::with_capacity(ids.len());
        for vulnerability_id in &ids {
            let key = RecordKey::new(vendor_id, vulnerability_id.as_str())?;
            let record = self.fetch_record(&key).map_err(|err| match err {
                // An indexed id with no record is an integrity failure,
                // not a caller mistake.
                LedgerError::NotFound(_) => LedgerError::Storage(format!(
                    "vendor index references missing record {key}"
                )),
                other => other,
            })?;
            records.push(record);
        }

        debug!(
            vendor_id,
            count = records.len(),
            "[registry] vendor history served"
        );
        Ok(records)
    }

    /// The authority-tier detail for a vulnerability.
    ///
    /// Tier visibility is checked at the handler boundary; this method
    /// assumes an authorized caller.
    pub fn get_researcher_contact(
        &self,
        vulnerability_id: &str,
    ) -> Result<VulnerabilityPrivateDetail, LedgerError> {
        if vulnerability_id.trim().is_empty() {
            return Err(LedgerError::Validation(
                "vulnerabilityId must not be empty".to_string(),
            ));
        }

        let bytes = self
            .store
            .get_private(Partition::AuthorityDetails, vulnerability_id)?
            .ok_or_else(|| {
                LedgerError::NotFound(format!(
                    "no private detail stored for vulnerability {vulnerability_id}"
                ))
            })?;
        decode(&bytes, "private detail")
    }

    /// Resolves a vendor-tier record with no side effects.
    ///
    /// Accepts the composite `<vendorId>:<vulnerabilityId>` form or a bare
    /// vulnerability id, which is resolved through the index written at
    /// create time.
    pub fn read_vulnerability(&self, raw_key: &str) -> Result<VulnerabilityRecord, LedgerError> {
        match LookupKey::parse(raw_key)? {
            LookupKey::Composite(key) => self.fetch_record(&key),
            LookupKey::VulnerabilityId(vulnerability_id) => {
                let pointer = self
                    .store
                    .get_private(
                        Partition::VendorRecords,
                        &vulnerability_index_key(&vulnerability_id),
                    )?
                    .ok_or_else(|| {
                        LedgerError::NotFound(format!(
                            "vulnerability {vulnerability_id} is not registered"
                        ))
                    })?;
                let vendor_id: String = decode(&pointer, "vulnerability index")?;
                self.fetch_record(&RecordKey::new(vendor_id, vulnerability_id)?)
            }
        }
    }

    /// Rewrites the two mutable fields of an existing record.
    ///
    /// Identity and descriptive fields are immutable after creation;
    /// whether a state may move backwards is deployment policy and is not
    /// checked here.
    pub fn update_vulnerability_status(
        &self,
        vendor_id: &str,
        vulnerability_id: &str,
        patch_state: PatchState,
        payment_state: PaymentState,
    ) -> Result<VulnerabilityRecord, LedgerError> {
        let _gate = self.write_gate.lock();

        let key = RecordKey::new(vendor_id, vulnerability_id)?;
        let mut record = self.fetch_record(&key)?;
        record.patch_state = patch_state;
        record.payment_state = payment_state;

        self.store
            .put_private(Partition::VendorRecords, &key.storage_key(), encode(&record)?)?;

        info!(
            vendor_id,
            vulnerability_id,
            patch_state = %patch_state,
            payment_state = %payment_state,
            "[registry] status updated"
        );
        Ok(record)
    }

    /// The payment-facing projection of a record.
    pub fn get_payment_details(
        &self,
        vendor_id: &str,
        vulnerability_id: &str,
    ) -> Result<PaymentDetails, LedgerError> {
        let key = RecordKey::new(vendor_id, vulnerability_id)?;
        let record = self.fetch_record(&key)?;
        Ok(PaymentDetails::from(&record))
    }

    fn fetch_record(&self, key: &RecordKey) -> Result<VulnerabilityRecord, LedgerError> {
        let bytes = self
            .store
            .get_private(Partition::VendorRecords, &key.storage_key())?
            .ok_or_else(|| LedgerError::NotFound(format!("no record stored under {key}")))?;
        decode(&bytes, "vendor record")
    }
}

/// Journal of applied writes, unwound in reverse on failure.
struct UndoLog {
    entries: Vec<(Partition, String, Option<Vec<u8>>)>,
}

impl UndoLog {
    fn new() -> Self {
        UndoLog { entries: Vec::new() }
    }

    fn record(&mut self, partition: Partition, key: String, prior: Option<Vec<u8>>) {
        self.entries.push((partition, key, prior));
    }

    fn unwind<P: PrivateDataStore>(self, store: &P) {
        for (partition, key, prior) in self.entries.into_iter().rev() {
            let result = match prior {
                Some(bytes) => store.put_private(partition, &key, bytes),
                None => store.delete_private(partition, &key),
            };
            if let Err(err) = result {
                warn!(
                    key = %key,
                    partition = partition.name(),
                    error = %err,
                    "[registry] rollback write failed"
                );
            }
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(value)
        .map_err(|err| LedgerError::Storage(format!("failed to encode value: {err}")))
}

fn decode<T: DeserializeOwned>(bytes: &[u8], what: &str) -> Result<T, LedgerError> {
    serde_json::from_slice(bytes)
        .map_err(|err| LedgerError::Storage(format!("{what} is corrupted: {err}")))
}
