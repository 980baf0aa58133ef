use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level toggle configuration shared across the runtime and the tooling.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThubConfigInner {
    pub catalogue: CatalogueConfig,
    pub validator: ValidatorConfig,
    pub runtime: RuntimeConfig,
    pub operator: OperatorConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ThubConfig {
    #[serde(flatten, default)]
    inner: Arc<ThubConfigInner>,
}

impl Deref for ThubConfig {
    type Target = ThubConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ThubConfig {
    fn deref_mut(&mut self) -> &mut ThubConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where the catalogue source and its generated artifacts live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    pub path: PathBuf,
    pub artifacts_dir: PathBuf,
    pub startup_timeout_ms: u64,
}

/// Validator knobs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Experimental flags permitted to default to enabled.
    pub allow_enabled_experimental: Vec<String>,
    /// Names exempt from the identifier pattern.
    pub legacy_names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub dev_mode: bool,
    /// Directory of the durable override ledger. `None` keeps overrides in memory, which loses
    /// pending restart changes on exit.
    pub state_dir: Option<PathBuf>,
}

/// Static operator overrides, the lowest-precedence override source.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Flags forced on.
    pub enable: Vec<String>,
    /// Explicit values; these win over `enable`.
    pub flags: BTreeMap<String, bool>,
}

impl OperatorConfig {
    #[must_use]
    pub fn overrides(&self) -> BTreeMap<String, bool> {
        let mut merged: BTreeMap<String, bool> =
            self.enable.iter().map(|name| (name.clone(), true)).collect();
        merged.extend(self.flags.iter().map(|(name, value)| (name.clone(), *value)));
        merged
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub dir: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("toggles/catalogue.toml"),
            artifacts_dir: PathBuf::from("toggles/generated"),
            startup_timeout_ms: 5_000,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { dev_mode: false, state_dir: Some(PathBuf::from("toggles/state")) }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, dir: None, json: false }
    }
}
