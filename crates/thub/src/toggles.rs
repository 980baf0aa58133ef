use crate::error::TogglesError;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;
use thub_artifacts::CheckedInArtifacts;
use thub_catalogue::{Catalogue, load_catalogue};
use thub_domain::config::ThubConfig;
use thub_domain::{PolicySet, Snapshot, Stage};
use thub_resolver::{
    DefaultResolver, Ledger, OverrideResolver, OverrideStore, Resolution, ResolveContext, SetOutcome,
};
use thub_storage::Storage;
use thub_validator::{ValidatedCatalogue, ValidationOptions};
use tracing::{error, info, warn};

/// Builder for [`FeatureToggles`]. Everything not set explicitly comes from the config.
#[derive(Debug, Default)]
pub struct TogglesBuilder {
    config: ThubConfig,
    catalogue: Option<Catalogue>,
    prior: Option<Snapshot>,
    ledger: Option<Ledger>,
}

impl TogglesBuilder {
    #[must_use]
    pub fn config(mut self, config: ThubConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses an already loaded catalogue instead of reading `catalogue.path`.
    #[must_use]
    pub fn catalogue(mut self, catalogue: Catalogue) -> Self {
        self.catalogue = Some(catalogue);
        self
    }

    /// Baseline snapshot. Defaults to `snapshot.json` in `catalogue.artifacts_dir`, if present.
    #[must_use]
    pub fn prior(mut self, snapshot: Snapshot) -> Self {
        self.prior = Some(snapshot);
        self
    }

    /// Override ledger. Defaults to a file ledger in `runtime.state_dir` (`toggles/state`), and
    /// to memory only when that is explicitly unset.
    #[must_use]
    pub fn ledger(mut self, ledger: Ledger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Loads, validates and wires the runtime.
    ///
    /// Pending overrides recorded by the previous process become active here, exactly once.
    ///
    /// # Errors
    /// * [`TogglesError::Catalogue`] on structural errors or a load timeout.
    /// * [`TogglesError::Validation`] if the catalogue has any consistency violation.
    /// * [`TogglesError::Storage`] / [`TogglesError::Resolver`] if the ledger is unusable.
    pub async fn bootstrap(self) -> Result<FeatureToggles, TogglesError> {
        let config = self.config;

        let catalogue = match self.catalogue {
            Some(catalogue) => catalogue,
            None => {
                let timeout = Duration::from_millis(config.catalogue.startup_timeout_ms);
                load_catalogue(&config.catalogue.path, timeout).await?
            },
        };

        let prior = match self.prior {
            Some(prior) => Some(prior),
            None => CheckedInArtifacts::read_from(&config.catalogue.artifacts_dir).await?.snapshot()?,
        };

        let options = ValidationOptions::from(&config.validator);
        let validated = ValidatedCatalogue::new(catalogue, prior.as_ref(), &options).map_err(|report| {
            for violation in &report.violations {
                error!(%violation, "Consistency violation");
            }
            TogglesError::from(report)
        })?;

        let ledger = match (self.ledger, &config.runtime.state_dir) {
            (Some(ledger), _) => ledger,
            (None, Some(dir)) => Ledger::File(Storage::builder().root(dir).open().await?),
            (None, None) => {
                let restart_gated = validated.flags().iter().filter(|f| f.has(PolicySet::REQUIRES_RESTART)).count();
                if restart_gated > 0 {
                    warn!(
                        restart_gated,
                        "No runtime.state_dir configured; pending restart overrides will not survive this process"
                    );
                }
                Ledger::memory()
            },
        };
        let store = OverrideStore::open(ledger).await?;

        let defaults = prior.as_ref().map_or_else(DefaultResolver::new, DefaultResolver::with_history);
        let resolver = OverrideResolver::new(validated, &defaults, config.operator.overrides(), store);

        info!(flags = resolver.catalogue().len(), dev_mode = config.runtime.dev_mode, "Feature toggles ready");
        Ok(FeatureToggles { resolver, dev_mode: config.runtime.dev_mode })
    }
}

/// The runtime toggle surface: queries for gated subsystems and mutations for an admin surface.
///
/// Queries never fail; unknown names resolve to `false`.
#[derive(Debug)]
pub struct FeatureToggles {
    resolver: OverrideResolver,
    dev_mode: bool,
}

impl FeatureToggles {
    #[must_use]
    pub fn builder() -> TogglesBuilder {
        TogglesBuilder::default()
    }

    #[must_use]
    pub const fn catalogue(&self) -> &ValidatedCatalogue {
        self.resolver.catalogue()
    }

    #[must_use]
    pub fn is_enabled(&self, name: &str, ctx: &ResolveContext) -> bool {
        match self.resolve(name, ctx) {
            Some(resolution) => resolution.is_enabled(),
            None => {
                warn!(flag = name, "Unknown flag queried, treating as disabled");
                false
            },
        }
    }

    /// Full resolution with origin and gate, for diagnostics. `None` for unknown names.
    ///
    /// Developer mode is on if either the process config or the context says so.
    #[must_use]
    pub fn resolve(&self, name: &str, ctx: &ResolveContext) -> Option<Resolution> {
        let ctx = if self.dev_mode && !ctx.dev_mode {
            let mut owned = ctx.clone();
            owned.dev_mode = true;
            Cow::Owned(owned)
        } else {
            Cow::Borrowed(ctx)
        };
        self.resolver.resolve(name, &ctx)
    }

    #[must_use]
    pub fn stage(&self, name: &str) -> Option<Stage> {
        self.catalogue().stage(name)
    }

    /// # Errors
    /// Fails for unknown names or when the ledger cannot be written.
    pub async fn set_override(&self, name: &str, enabled: bool) -> Result<SetOutcome, TogglesError> {
        Ok(self.resolver.set_override(name, enabled).await?)
    }

    /// # Errors
    /// Fails for unknown names or when the ledger cannot be written.
    pub async fn clear_override(&self, name: &str) -> Result<SetOutcome, TogglesError> {
        Ok(self.resolver.clear_override(name).await?)
    }

    /// Effective state of every flag listed in the frontend manifest.
    #[must_use]
    pub fn frontend_state(&self, ctx: &ResolveContext) -> BTreeMap<String, bool> {
        self.catalogue()
            .flags()
            .iter()
            .filter(|flag| flag.policy.is_frontend_visible())
            .map(|flag| (flag.name.clone(), self.is_enabled(&flag.name, ctx)))
            .collect()
    }

    /// Flags with an admin change waiting for the next restart.
    #[must_use]
    pub fn pending_restart(&self) -> Vec<String> {
        self.resolver.store().snapshot().pending.keys().cloned().collect()
    }

    /// Whether `name` is restart-gated.
    #[must_use]
    pub fn requires_restart(&self, name: &str) -> bool {
        self.catalogue().get(name).is_some_and(|flag| flag.has(PolicySet::REQUIRES_RESTART))
    }
}
