//! # Receiver Commands
//!
//! Typed form of the receiver's invocation surface. The nonce arrives as
//! a positional string and must parse as an unsigned 64-bit integer
//! before any state is touched.

use shared_types::{Invocation, LedgerError};

/// One parsed receiver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiverCommand {
    /// Process one interledger delivery.
    InterledgerReceive { nonce: u64, secret_data: String },
}

impl ReceiverCommand {
    /// Parses an invocation into a command.
    ///
    /// Returns `UnknownFunction` for names outside the receiver's surface
    /// and `Validation` for arity or nonce parse errors.
    pub fn parse(invocation: &Invocation) -> Result<Self, LedgerError> {
        let args = &invocation.args;
        match invocation.function.as_str() {
            "interledgerReceive" => {
                if args.len() != 2 {
                    return Err(LedgerError::Validation(format!(
                        "incorrect number of arguments for interledgerReceive: expecting 2, got {}",
                        args.len()
                    )));
                }
                let nonce: u64 = args[0].trim().parse().map_err(|_| {
                    LedgerError::Validation(format!(
                        "nonce must be an unsigned 64-bit integer, got {:?}",
                        args[0]
                    ))
                })?;
                Ok(ReceiverCommand::InterledgerReceive {
                    nonce,
                    secret_data: args[1].clone(),
                })
            }
            other => Err(LedgerError::UnknownFunction(other.to_string())),
        }
    }

    /// Wire name of the command, for logs.
    #[must_use]
    pub fn function_name(&self) -> &'static str {
        match self {
            ReceiverCommand::InterledgerReceive { .. } => "interledgerReceive",
        }
    }
}
