use fxhash::FxHashMap;
use thub_domain::{FlagDefinition, FlagState, Snapshot, Stage};

/// Default state of a flag without history.
///
/// `enabled` wins over `expression`; `expression == "true"` enables; every stage's baseline is
/// Disabled.
#[must_use]
pub fn default_state(flag: &FlagDefinition) -> FlagState {
    flag.explicit_default().map_or(FlagState::Disabled, FlagState::from)
}

/// [`default_state`] plus the recorded defaults of the prior snapshot, so a Deprecated flag
/// without an explicit default keeps the value it last shipped with.
#[derive(Debug, Clone, Default)]
pub struct DefaultResolver {
    history: FxHashMap<String, bool>,
}

impl DefaultResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_history(prior: &Snapshot) -> Self {
        let history = prior.flags.iter().map(|e| (e.name.clone(), e.default_enabled)).collect();
        Self { history }
    }

    #[must_use]
    pub fn resolve(&self, flag: &FlagDefinition) -> FlagState {
        if let Some(explicit) = flag.explicit_default() {
            return explicit.into();
        }
        if flag.stage == Stage::Deprecated
            && let Some(last) = self.history.get(&flag.name)
        {
            return (*last).into();
        }
        FlagState::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thub_domain::SnapshotEntry;

    fn history(name: &str, default_enabled: bool) -> Snapshot {
        Snapshot {
            digest: String::new(),
            flags: vec![SnapshotEntry {
                name: name.to_owned(),
                stage: Stage::GeneralAvailability,
                owner: "core".to_owned(),
                default_enabled,
                requires_restart: false,
                frontend_only: false,
            }],
            retired: Vec::new(),
        }
    }

    #[test]
    fn alpha_defaults_to_disabled() {
        let alpha = FlagDefinition::new("alpha", Stage::Experimental, "core");
        assert_eq!(default_state(&alpha), FlagState::Disabled);
    }

    #[test]
    fn beta_expression_enables() {
        let beta = FlagDefinition::new("beta", Stage::GeneralAvailability, "core").with_expression("true");
        assert_eq!(default_state(&beta), FlagState::Enabled);
    }

    #[test]
    fn enabled_takes_precedence_over_expression() {
        let flag = FlagDefinition::new("f", Stage::PublicPreview, "core")
            .with_expression("true")
            .with_enabled(false);
        assert_eq!(default_state(&flag), FlagState::Disabled);

        let flag = FlagDefinition::new("f", Stage::PublicPreview, "core")
            .with_expression("false")
            .with_enabled(true);
        assert_eq!(default_state(&flag), FlagState::Enabled);
    }

    #[test]
    fn deprecated_keeps_last_known_default() {
        let topnav = FlagDefinition::new("topnav", Stage::Deprecated, "core");
        let resolver = DefaultResolver::with_history(&history("topnav", true));

        assert_eq!(resolver.resolve(&topnav), FlagState::Enabled);
        assert_eq!(default_state(&topnav), FlagState::Disabled);
    }

    #[test]
    fn history_only_applies_to_deprecated_flags() {
        let flag = FlagDefinition::new("topnav", Stage::GeneralAvailability, "core");
        let resolver = DefaultResolver::with_history(&history("topnav", true));
        assert_eq!(resolver.resolve(&flag), FlagState::Disabled);
    }

    #[test]
    fn explicit_default_beats_history() {
        let flag = FlagDefinition::new("topnav", Stage::Deprecated, "core").with_enabled(false);
        let resolver = DefaultResolver::with_history(&history("topnav", true));
        assert_eq!(resolver.resolve(&flag), FlagState::Disabled);
    }
}
