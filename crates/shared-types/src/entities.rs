//! # Core Domain Entities
//!
//! Defines the vulnerability record tiers and the receiver's secret data
//! item, with the enumerated field types used across both components.
//!
//! ## Clusters
//!
//! - **Vendor tier**: `VulnerabilityRecord`, `PaymentDetails`
//! - **Authority tier**: `VulnerabilityPrivateDetail`
//! - **Receiver log**: `SecretDataItem`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

// =============================================================================
// ENUMERATED FIELDS
// =============================================================================

/// Severity classification of a reported vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// The wire form used in positional arguments and stored JSON.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(LedgerError::Validation(format!(
                "unknown severity: {other}"
            ))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remediation progress for the vulnerability.
///
/// Transitions are not validated as monotonic here; whether a record may
/// move from `Patched` back to `Unpatched` is deployment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchState {
    Unpatched,
    InProgress,
    Patched,
}

impl PatchState {
    /// The wire form used in positional arguments and stored JSON.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchState::Unpatched => "unpatched",
            PatchState::InProgress => "in-progress",
            PatchState::Patched => "patched",
        }
    }
}

impl FromStr for PatchState {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpatched" => Ok(PatchState::Unpatched),
            "in-progress" => Ok(PatchState::InProgress),
            "patched" => Ok(PatchState::Patched),
            other => Err(LedgerError::Validation(format!(
                "unknown patch state: {other}"
            ))),
        }
    }
}

impl fmt::Display for PatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounty payment progress for the vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Pending,
    Paid,
    Waived,
}

impl PaymentState {
    /// The wire form used in positional arguments and stored JSON.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Pending => "pending",
            PaymentState::Paid => "paid",
            PaymentState::Waived => "waived",
        }
    }
}

impl FromStr for PaymentState {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentState::Pending),
            "paid" => Ok(PaymentState::Paid),
            "waived" => Ok(PaymentState::Waived),
            other => Err(LedgerError::Validation(format!(
                "unknown payment state: {other}"
            ))),
        }
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// VENDOR TIER
// =============================================================================

/// A vulnerability record in the vendor-visible tier.
///
/// Keyed by the composite (`vendor_id`, `vulnerability_id`) pair, which is a
/// stable identity: after creation only `patch_state` and `payment_state`
/// may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityRecord {
    /// Identifier of the vendor whose product is affected.
    pub vendor_id: String,
    /// Vendor-scoped identifier of the vulnerability (e.g. a CVE id).
    pub vulnerability_id: String,
    /// Human-readable vendor name.
    pub vendor_name: String,
    /// Name of the affected product.
    pub product_name: String,
    /// Free-form classification (e.g. "buffer-overflow").
    pub vulnerability_type: String,
    /// Severity classification.
    pub vulnerability_severity: Severity,
    /// Remediation progress.
    pub patch_state: PatchState,
    /// Bounty payment progress.
    pub payment_state: PaymentState,
    /// Disclosure grace period in days. Non-negative.
    pub grace_period: f64,
    /// Bounty amount offered for the report. Non-negative.
    pub bounty_amt: f64,
}

/// Payment-facing projection of a `VulnerabilityRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Identifier of the vendor whose product is affected.
    pub vendor_id: String,
    /// Vendor-scoped identifier of the vulnerability.
    pub vulnerability_id: String,
    /// Bounty payment progress.
    pub payment_state: PaymentState,
    /// Disclosure grace period in days.
    pub grace_period: f64,
    /// Bounty amount offered for the report.
    pub bounty_amt: f64,
}

impl From<&VulnerabilityRecord> for PaymentDetails {
    fn from(record: &VulnerabilityRecord) -> Self {
        PaymentDetails {
            vendor_id: record.vendor_id.clone(),
            vulnerability_id: record.vulnerability_id.clone(),
            payment_state: record.payment_state,
            grace_period: record.grace_period,
            bounty_amt: record.bounty_amt,
        }
    }
}

// =============================================================================
// AUTHORITY TIER
// =============================================================================

/// The authority-only detail record accompanying a `VulnerabilityRecord`.
///
/// Keyed by `vulnerability_id` alone and written atomically with its vendor
/// tier counterpart. The `researcher_contact` field never crosses into the
/// vendor tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityPrivateDetail {
    /// Vendor-scoped identifier of the vulnerability.
    pub vulnerability_id: String,
    /// Human-readable vendor name.
    pub vendor_name: String,
    /// Name of the affected product.
    pub product_name: String,
    /// How to reach the reporting researcher (postal or email address).
    pub researcher_contact: String,
}

// =============================================================================
// RECEIVER LOG
// =============================================================================

/// One accepted interledger delivery in the receiver's append-only log.
///
/// The nonce is the caller-supplied delivery identifier and doubles as the
/// deduplication key under redelivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretDataItem {
    /// Delivery identifier assigned by the sending side.
    pub nonce: u64,
    /// Opaque payload. The storage layer accepts text only, so binary
    /// content is carried as a printable encoding.
    pub secret_data: String,
}

impl SecretDataItem {
    /// Creates an item from a text payload.
    #[must_use]
    pub fn new(nonce: u64, secret_data: impl Into<String>) -> Self {
        SecretDataItem {
            nonce,
            secret_data: secret_data.into(),
        }
    }

    /// Creates an item from a binary payload, hex-encoding it into the
    /// printable form the log stores.
    #[must_use]
    pub fn with_binary_payload(nonce: u64, payload: &[u8]) -> Self {
        SecretDataItem {
            nonce,
            secret_data: hex::encode(payload),
        }
    }
}
