//! # Registry Commands
//!
//! Typed form of the registry's invocation surface. Function names and
//! positional arguments are parsed into this enum once, at the boundary,
//! so no stringly dispatch survives past it.

use std::str::FromStr;

use shared_types::{Invocation, LedgerError, PatchState, PaymentState};

use crate::domain::params::CreateVulnerabilityParams;

/// One parsed registry invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryCommand {
    /// Create a record pair across both tiers.
    CreateVulnerability(CreateVulnerabilityParams),
    /// All records of one vendor, in creation order.
    GetVendorHistory { vendor_id: String },
    /// Authority-tier detail lookup.
    GetResearcherContact { vulnerability_id: String },
    /// Side-effect-free record resolution for cross-component validation.
    ReadVulnerability { key: String },
    /// Rewrite of the two mutable record fields.
    UpdateVulnerabilityStatus {
        vendor_id: String,
        vulnerability_id: String,
        patch_state: PatchState,
        payment_state: PaymentState,
    },
    /// Payment-facing projection of one record.
    GetPaymentDetails {
        vendor_id: String,
        vulnerability_id: String,
    },
}

impl RegistryCommand {
    /// Parses an invocation into a command.
    ///
    /// Returns `UnknownFunction` for names outside the registry's surface
    /// and `Validation` for arity or argument errors.
    pub fn parse(invocation: &Invocation) -> Result<Self, LedgerError> {
        let args = &invocation.args;
        match invocation.function.as_str() {
            "createVulnerability" => {
                CreateVulnerabilityParams::from_args(args).map(RegistryCommand::CreateVulnerability)
            }
            "getVendorHistory" => {
                expect_args("getVendorHistory", args, 1)?;
                Ok(RegistryCommand::GetVendorHistory {
                    vendor_id: args[0].clone(),
                })
            }
            "getResearcherContact" => {
                expect_args("getResearcherContact", args, 1)?;
                Ok(RegistryCommand::GetResearcherContact {
                    vulnerability_id: args[0].clone(),
                })
            }
            "readVulnerability" => {
                expect_args("readVulnerability", args, 1)?;
                Ok(RegistryCommand::ReadVulnerability {
                    key: args[0].clone(),
                })
            }
            "updateVulnerabilityStatus" => {
                expect_args("updateVulnerabilityStatus", args, 4)?;
                Ok(RegistryCommand::UpdateVulnerabilityStatus {
                    vendor_id: args[0].clone(),
                    vulnerability_id: args[1].clone(),
                    patch_state: PatchState::from_str(&args[2])?,
                    payment_state: PaymentState::from_str(&args[3])?,
                })
            }
            "getPaymentDetails" => {
                expect_args("getPaymentDetails", args, 2)?;
                Ok(RegistryCommand::GetPaymentDetails {
                    vendor_id: args[0].clone(),
                    vulnerability_id: args[1].clone(),
                })
            }
            other => Err(LedgerError::UnknownFunction(other.to_string())),
        }
    }

    /// Wire name of the command, for logs and permission errors.
    #[must_use]
    pub fn function_name(&self) -> &'static str {
        match self {
            RegistryCommand::CreateVulnerability(_) => "createVulnerability",
            RegistryCommand::GetVendorHistory { .. } => "getVendorHistory",
            RegistryCommand::GetResearcherContact { .. } => "getResearcherContact",
            RegistryCommand::ReadVulnerability { .. } => "readVulnerability",
            RegistryCommand::UpdateVulnerabilityStatus { .. } => "updateVulnerabilityStatus",
            RegistryCommand::GetPaymentDetails { .. } => "getPaymentDetails",
        }
    }
}

fn expect_args(function: &str, args: &[String], count: usize) -> Result<(), LedgerError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "incorrect number of arguments for {function}: expecting {count}, got {}",
            args.len()
        )))
    }
}
