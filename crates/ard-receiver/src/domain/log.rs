//! # Secret Data Log
//!
//! The receiver's append-only log of accepted deliveries, stored as one
//! JSON array under a fixed state key. The log position is the implicit
//! key; the nonce is the logical identity, so a nonce index is rebuilt
//! from the persisted items on load and kept current on append. That index
//! is what makes redelivery idempotent.

use std::collections::HashSet;

use shared_types::{LedgerError, SecretDataItem};

/// State key the item log is stored under.
pub const ITEMS_KEY: &str = "items";

/// In-memory view of the persisted item log, with its nonce index.
#[derive(Debug, Default)]
pub struct SecretDataLog {
    items: Vec<SecretDataItem>,
    nonces: HashSet<u64>,
}

impl SecretDataLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        SecretDataLog::default()
    }

    /// Rebuilds the log and its nonce index from persisted bytes.
    ///
    /// `None` means the log was never initialized; that decodes to an
    /// empty log rather than an error, so a fresh component starts clean.
    pub fn from_bytes(bytes: Option<&[u8]>) -> Result<Self, LedgerError> {
        let items: Vec<SecretDataItem> = match bytes {
            Some(bytes) => serde_json::from_slice(bytes).map_err(|err| {
                LedgerError::Storage(format!("secret data log is corrupted: {err}"))
            })?,
            None => Vec::new(),
        };
        let nonces = items.iter().map(|item| item.nonce).collect();
        Ok(SecretDataLog { items, nonces })
    }

    /// The persisted wire form of the current items.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        serde_json::to_vec(&self.items)
            .map_err(|err| LedgerError::Storage(format!("failed to encode secret data log: {err}")))
    }

    /// The wire form the log would have after appending `item`, computed
    /// without mutating the log. The accept path persists these bytes
    /// first and appends only once the write succeeded, so the in-memory
    /// view never runs ahead of storage.
    pub fn encoded_with(&self, item: &SecretDataItem) -> Result<Vec<u8>, LedgerError> {
        let mut items: Vec<&SecretDataItem> = self.items.iter().collect();
        items.push(item);
        serde_json::to_vec(&items)
            .map_err(|err| LedgerError::Storage(format!("failed to encode secret data log: {err}")))
    }

    /// Returns true if an item with this nonce was already accepted.
    #[must_use]
    pub fn contains(&self, nonce: u64) -> bool {
        self.nonces.contains(&nonce)
    }

    /// Appends an accepted item and indexes its nonce.
    ///
    /// The caller is responsible for the idempotency check; appending a
    /// duplicate nonce is a logic error and is rejected.
    pub fn append(&mut self, item: SecretDataItem) -> Result<(), LedgerError> {
        if !self.nonces.insert(item.nonce) {
            return Err(LedgerError::Validation(format!(
                "nonce {} is already in the log",
                item.nonce
            )));
        }
        self.items.push(item);
        Ok(())
    }

    /// The accepted items, in acceptance order.
    #[must_use]
    pub fn items(&self) -> &[SecretDataItem] {
        &self.items
    }

    /// Number of accepted items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
