//! # Creation Parameters
//!
//! `createVulnerability` takes eleven positional string arguments on the
//! wire. This module parses and validates them into a typed parameter set
//! before the service touches any state.

use std::str::FromStr;

use shared_types::{
    LedgerError, PatchState, PaymentState, Severity, VulnerabilityPrivateDetail,
    VulnerabilityRecord,
};

use crate::domain::keys::RecordKey;

/// Number of positional arguments `createVulnerability` expects.
pub const CREATE_ARG_COUNT: usize = 11;

/// Validated inputs for creating one vulnerability record pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVulnerabilityParams {
    /// Composite identity of the new record.
    pub key: RecordKey,
    /// Human-readable vendor name.
    pub vendor_name: String,
    /// Name of the affected product.
    pub product_name: String,
    /// Free-form classification.
    pub vulnerability_type: String,
    /// Severity classification.
    pub vulnerability_severity: Severity,
    /// Initial remediation state.
    pub patch_state: PatchState,
    /// Initial payment state.
    pub payment_state: PaymentState,
    /// Disclosure grace period in days.
    pub grace_period: f64,
    /// Bounty amount offered for the report.
    pub bounty_amt: f64,
    /// Researcher contact, destined for the authority tier only.
    pub researcher_contact: String,
}

impl CreateVulnerabilityParams {
    /// Parses the positional wire arguments.
    ///
    /// Argument order: vendorId, vulnerabilityId, vendorName, productName,
    /// vulnerabilityType, severity, patchState, paymentState, gracePeriod,
    /// bountyAmt, researcherContact.
    pub fn from_args(args: &[String]) -> Result<Self, LedgerError> {
        if args.len() != CREATE_ARG_COUNT {
            return Err(LedgerError::Validation(format!(
                "incorrect number of arguments for createVulnerability: expecting {CREATE_ARG_COUNT}, got {}",
                args.len()
            )));
        }

        let key = RecordKey::new(args[0].as_str(), args[1].as_str())?;
        let vulnerability_severity = Severity::from_str(&args[5])?;
        let patch_state = PatchState::from_str(&args[6])?;
        let payment_state = PaymentState::from_str(&args[7])?;
        let grace_period = parse_non_negative("gracePeriod", &args[8])?;
        let bounty_amt = parse_non_negative("bountyAmt", &args[9])?;

        Ok(CreateVulnerabilityParams {
            key,
            vendor_name: args[2].clone(),
            product_name: args[3].clone(),
            vulnerability_type: args[4].clone(),
            vulnerability_severity,
            patch_state,
            payment_state,
            grace_period,
            bounty_amt,
            researcher_contact: args[10].clone(),
        })
    }

    /// The vendor-tier record these parameters describe.
    #[must_use]
    pub fn record(&self) -> VulnerabilityRecord {
        VulnerabilityRecord {
            vendor_id: self.key.vendor_id().to_string(),
            vulnerability_id: self.key.vulnerability_id().to_string(),
            vendor_name: self.vendor_name.clone(),
            product_name: self.product_name.clone(),
            vulnerability_type: self.vulnerability_type.clone(),
            vulnerability_severity: self.vulnerability_severity,
            patch_state: self.patch_state,
            payment_state: self.payment_state,
            grace_period: self.grace_period,
            bounty_amt: self.bounty_amt,
        }
    }

    /// The authority-tier detail these parameters describe.
    #[must_use]
    pub fn private_detail(&self) -> VulnerabilityPrivateDetail {
        VulnerabilityPrivateDetail {
            vulnerability_id: self.key.vulnerability_id().to_string(),
            vendor_name: self.vendor_name.clone(),
            product_name: self.product_name.clone(),
            researcher_contact: self.researcher_contact.clone(),
        }
    }
}

fn parse_non_negative(field: &str, raw: &str) -> Result<f64, LedgerError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        LedgerError::Validation(format!("{field} must be a number, got {raw:?}"))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(LedgerError::Validation(format!(
            "{field} must be a non-negative finite number, got {raw:?}"
        )));
    }
    Ok(value)
}
