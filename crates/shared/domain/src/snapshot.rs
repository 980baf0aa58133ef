use crate::flag::Stage;
use serde::{Deserialize, Serialize};

/// Generated default-state snapshot. The checked-in copy is the historical baseline
/// for stage monotonicity, removals, retired names and Deprecated defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Hex SHA-256 of the canonical catalogue source.
    pub digest: String,
    pub flags: Vec<SnapshotEntry>,
    /// Every name in the retired ledger when the snapshot was generated.
    #[serde(default)]
    pub retired: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub name: String,
    pub stage: Stage,
    pub owner: String,
    pub default_enabled: bool,
    #[serde(default)]
    pub requires_restart: bool,
    #[serde(default)]
    pub frontend_only: bool,
}

impl Snapshot {
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&SnapshotEntry> {
        self.flags.iter().find(|entry| entry.name == name)
    }
}
