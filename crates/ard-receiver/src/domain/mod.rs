//! Receiver domain model: the persisted secret data log.

pub mod log;

pub use log::{SecretDataLog, ITEMS_KEY};
