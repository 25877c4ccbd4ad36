//! # Record Keys
//!
//! Three key families share the vendor partition:
//!
//! - `record:<vendorId>:<vulnerabilityId>`, the composite record key
//! - `vendor-index:<vendorId>`, the per-vendor creation-order index
//! - `vuln-index:<vulnerabilityId>`, vulnerability id to vendor id
//!
//! Keying records by the composite pair is what keeps multiple
//! vulnerabilities of one vendor from colliding into a single slot.
//! Identifiers may not contain the separator, so every stored key parses
//! unambiguously.

use std::fmt;

use shared_types::LedgerError;

/// Separator between the vendor and vulnerability parts of a composite key.
pub const KEY_SEPARATOR: char = ':';

/// Validated composite identity of a vulnerability record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    vendor_id: String,
    vulnerability_id: String,
}

impl RecordKey {
    /// Builds a key from its parts.
    ///
    /// Both parts must be non-empty and free of the separator character.
    pub fn new(
        vendor_id: impl Into<String>,
        vulnerability_id: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let vendor_id = vendor_id.into();
        let vulnerability_id = vulnerability_id.into();

        validate_identifier("vendorId", &vendor_id)?;
        validate_identifier("vulnerabilityId", &vulnerability_id)?;

        Ok(RecordKey {
            vendor_id,
            vulnerability_id,
        })
    }

    /// The vendor part of the key.
    #[must_use]
    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    /// The vulnerability part of the key.
    #[must_use]
    pub fn vulnerability_id(&self) -> &str {
        &self.vulnerability_id
    }

    /// The key under which the record is stored in the vendor partition.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("record:{}{}{}", self.vendor_id, KEY_SEPARATOR, self.vulnerability_id)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.vendor_id, KEY_SEPARATOR, self.vulnerability_id)
    }
}

/// A lookup key as it arrives on the wire.
///
/// `readVulnerability` accepts either the composite form
/// `<vendorId>:<vulnerabilityId>` or a bare vulnerability id, which is
/// resolved through the `vuln-index` mapping. Cross-component deliveries
/// carry the bare form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// Fully qualified composite key.
    Composite(RecordKey),
    /// Bare vulnerability id needing index resolution.
    VulnerabilityId(String),
}

impl LookupKey {
    /// Parses a wire-form lookup key.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(LedgerError::Validation(
                "lookup key must not be empty".to_string(),
            ));
        }

        match raw.split_once(KEY_SEPARATOR) {
            Some((vendor_id, vulnerability_id)) => {
                Ok(LookupKey::Composite(RecordKey::new(vendor_id, vulnerability_id)?))
            }
            None => Ok(LookupKey::VulnerabilityId(raw.to_string())),
        }
    }
}

/// Key of the per-vendor creation-order index.
#[must_use]
pub fn vendor_index_key(vendor_id: &str) -> String {
    format!("vendor-index:{vendor_id}")
}

/// Key of the vulnerability id resolution index.
#[must_use]
pub fn vulnerability_index_key(vulnerability_id: &str) -> String {
    format!("vuln-index:{vulnerability_id}")
}

fn validate_identifier(field: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{field} must not be empty")));
    }
    if value.contains(KEY_SEPARATOR) {
        return Err(LedgerError::Validation(format!(
            "{field} must not contain '{KEY_SEPARATOR}'"
        )));
    }
    Ok(())
}
