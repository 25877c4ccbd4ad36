//! Receiver adapters over the ledger runtime ports.

pub mod registry_client;

pub use registry_client::InvokingRegistryClient;
