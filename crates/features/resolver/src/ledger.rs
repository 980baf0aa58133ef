use crate::error::{ResolverError, ResolverErrorExt};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thub_domain::constants::LEDGER_FILE;
use thub_storage::Storage;

/// Durable admin override state.
///
/// `pending` holds writes to restart-gated flags; `None` records a pending removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerRecord {
    pub applied: BTreeMap<String, bool>,
    pub pending: BTreeMap<String, Option<bool>>,
}

impl LedgerRecord {
    /// Moves every pending change into `applied`. Returns how many were promoted.
    pub fn promote_pending(&mut self) -> usize {
        let promoted = self.pending.len();
        for (name, change) in std::mem::take(&mut self.pending) {
            match change {
                Some(value) => self.applied.insert(name, value),
                None => self.applied.remove(&name),
            };
        }
        promoted
    }
}

/// Where the override ledger is persisted.
///
/// Clones of a [`Ledger::memory`] ledger share state, which lets tests simulate a restart
/// by opening a second store on the same ledger.
#[derive(Debug, Clone)]
pub enum Ledger {
    Memory(Arc<Mutex<LedgerRecord>>),
    File(Storage),
}

impl Ledger {
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// # Errors
    /// * [`ResolverError::Storage`] if the document cannot be read.
    /// * [`ResolverError::Ledger`] if it is not a valid ledger.
    pub async fn load(&self) -> Result<LedgerRecord, ResolverError> {
        match self {
            Self::Memory(record) => Ok(record.lock().clone()),
            Self::File(storage) => match storage.read(LEDGER_FILE).await? {
                Some(bytes) => serde_json::from_slice(&bytes).context("Failed to decode override ledger"),
                None => Ok(LedgerRecord::default()),
            },
        }
    }

    /// # Errors
    /// * [`ResolverError::Ledger`] if the record cannot be encoded.
    /// * [`ResolverError::Storage`] if the document cannot be written.
    pub async fn save(&self, record: &LedgerRecord) -> Result<(), ResolverError> {
        match self {
            Self::Memory(slot) => {
                slot.lock().clone_from(record);
                Ok(())
            },
            Self::File(storage) => {
                let bytes =
                    serde_json::to_vec_pretty(record).context("Failed to encode override ledger")?;
                storage.write(LEDGER_FILE, &bytes).await?;
                Ok(())
            },
        }
    }
}
