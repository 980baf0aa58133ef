use crate::context::ResolveContext;
use crate::default::DefaultResolver;
use crate::error::ResolverError;
use crate::resolution::{OverrideSources, Resolution, resolve};
use crate::store::OverrideStore;
use fxhash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use strum_macros::Display;
use thub_domain::{FlagState, PolicySet};
use thub_validator::ValidatedCatalogue;
use tracing::{info, warn};

/// Result of an admin mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SetOutcome {
    /// Active immediately.
    Applied,
    /// Recorded; takes effect after the next restart.
    Pending,
}

/// Resolves effective flag states over a validated catalogue.
#[derive(Debug)]
pub struct OverrideResolver {
    catalogue: ValidatedCatalogue,
    defaults: FxHashMap<String, FlagState>,
    operator: BTreeMap<String, bool>,
    store: OverrideStore,
}

impl OverrideResolver {
    /// Defaults are computed once here; the catalogue never changes afterwards.
    #[must_use]
    pub fn new(
        catalogue: ValidatedCatalogue,
        defaults: &DefaultResolver,
        operator: BTreeMap<String, bool>,
        store: OverrideStore,
    ) -> Self {
        for name in operator.keys().filter(|name| !catalogue.contains(name)) {
            warn!(flag = %name, "Operator override names an unknown flag");
        }

        let defaults: FxHashMap<String, FlagState> =
            catalogue.flags().iter().map(|f| (f.name.clone(), defaults.resolve(f))).collect();
        info!(flags = defaults.len(), operator = operator.len(), "Override resolver ready");

        Self { catalogue, defaults, operator, store }
    }

    #[must_use]
    pub const fn catalogue(&self) -> &ValidatedCatalogue {
        &self.catalogue
    }

    #[must_use]
    pub const fn store(&self) -> &OverrideStore {
        &self.store
    }

    #[must_use]
    pub fn default_state(&self, name: &str) -> Option<FlagState> {
        self.defaults.get(name).copied()
    }

    /// `None` for names outside the catalogue.
    #[must_use]
    pub fn resolve(&self, name: &str, ctx: &ResolveContext) -> Option<Resolution> {
        let flag = self.catalogue.get(name)?;
        let default = self.defaults.get(name).copied().unwrap_or(FlagState::Disabled);
        let admin = self.store.snapshot();
        let sources = OverrideSources { operator: &self.operator, admin: &admin.applied };

        Some(resolve(flag, default, sources, ctx))
    }

    /// Records an admin override.
    ///
    /// Restart-gated flags only record the value as pending; the active value stays frozen
    /// until the next start.
    ///
    /// # Errors
    /// * [`ResolverError::UnknownFlag`] for names outside the catalogue.
    /// * Ledger failures from the store.
    pub async fn set_override(&self, name: &str, enabled: bool) -> Result<SetOutcome, ResolverError> {
        self.mutate(name, Some(enabled)).await
    }

    /// Removes an admin override, with the same restart semantics as [`Self::set_override`].
    ///
    /// # Errors
    /// See [`Self::set_override`].
    pub async fn clear_override(&self, name: &str) -> Result<SetOutcome, ResolverError> {
        self.mutate(name, None).await
    }

    async fn mutate(&self, name: &str, value: Option<bool>) -> Result<SetOutcome, ResolverError> {
        let flag = self.catalogue.get(name).ok_or_else(|| ResolverError::UnknownFlag {
            message: name.to_owned().into(),
            context: Some("admin override".into()),
        })?;

        if flag.has(PolicySet::REQUIRES_RESTART) {
            let version = self.store.stage(name, value).await?;
            info!(flag = name, ?value, version, "Override recorded, pending restart");
            Ok(SetOutcome::Pending)
        } else {
            let version = self.store.apply(name, value).await?;
            info!(flag = name, ?value, version, "Override applied");
            Ok(SetOutcome::Applied)
        }
    }
}
