use crate::error::ResolverError;
use crate::ledger::{Ledger, LedgerRecord};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// One published, immutable view of the admin overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    pub version: u64,
    pub applied: BTreeMap<String, bool>,
    pub pending: BTreeMap<String, Option<bool>>,
}

impl OverrideSet {
    fn record(&self) -> LedgerRecord {
        LedgerRecord { applied: self.applied.clone(), pending: self.pending.clone() }
    }
}

/// Copy-on-write admin override store.
///
/// Readers clone the published `Arc` and never block writers for longer than the pointer swap.
/// Writers are serialized, persist the new state to the ledger first, then publish it with a
/// bumped version, so a reader never observes a half-applied change and a failed write changes
/// nothing.
#[derive(Debug)]
pub struct OverrideStore {
    current: RwLock<Arc<OverrideSet>>,
    writer: Mutex<()>,
    ledger: Ledger,
}

impl OverrideStore {
    /// Restores the ledger and promotes pending changes into the applied set.
    ///
    /// Promotion happens here, exactly once per start: the rewritten ledger no longer carries
    /// the promoted entries.
    ///
    /// # Errors
    /// Fails if the ledger cannot be read, decoded or rewritten.
    pub async fn open(ledger: Ledger) -> Result<Self, ResolverError> {
        let mut record = ledger.load().await?;
        let promoted = record.promote_pending();
        if promoted > 0 {
            ledger.save(&record).await?;
        }
        info!(applied = record.applied.len(), promoted, "Override ledger restored");

        let set = OverrideSet { version: 0, applied: record.applied, pending: record.pending };
        Ok(Self { current: RwLock::new(Arc::new(set)), writer: Mutex::new(()), ledger })
    }

    /// The currently published set.
    #[must_use]
    pub fn snapshot(&self) -> Arc<OverrideSet> {
        Arc::clone(&self.current.read())
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Sets (`Some`) or clears (`None`) an active admin override.
    ///
    /// # Errors
    /// Fails if the ledger cannot be written; the published set is then unchanged.
    pub async fn apply(&self, name: &str, value: Option<bool>) -> Result<u64, ResolverError> {
        self.update(|set| {
            set.pending.remove(name);
            match value {
                Some(v) => set.applied.insert(name.to_owned(), v),
                None => set.applied.remove(name),
            };
        })
        .await
    }

    /// Records a change that takes effect at the next start.
    ///
    /// # Errors
    /// Fails if the ledger cannot be written; the published set is then unchanged.
    pub async fn stage(&self, name: &str, value: Option<bool>) -> Result<u64, ResolverError> {
        self.update(|set| {
            set.pending.insert(name.to_owned(), value);
        })
        .await
    }

    async fn update(&self, change: impl FnOnce(&mut OverrideSet)) -> Result<u64, ResolverError> {
        let _guard = self.writer.lock().await;

        let mut next = OverrideSet::clone(&self.snapshot());
        change(&mut next);
        next.version += 1;

        self.ledger.save(&next.record()).await?;

        let version = next.version;
        *self.current.write() = Arc::new(next);
        debug!(version, "Published override set");
        Ok(version)
    }
}
