use thub_domain::config::ValidatorConfig;
use typed_builder::TypedBuilder;

/// Exemptions granted to specific flags.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ValidationOptions {
    /// Experimental flags allowed to default to enabled.
    #[builder(default, setter(into))]
    pub allow_enabled_experimental: Vec<String>,
    /// Names exempt from the identifier pattern.
    #[builder(default, setter(into))]
    pub legacy_names: Vec<String>,
}

impl ValidationOptions {
    #[must_use]
    pub fn is_legacy(&self, name: &str) -> bool {
        self.legacy_names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn allows_enabled_experimental(&self, name: &str) -> bool {
        self.allow_enabled_experimental.iter().any(|n| n == name)
    }
}

impl From<&ValidatorConfig> for ValidationOptions {
    fn from(config: &ValidatorConfig) -> Self {
        Self {
            allow_enabled_experimental: config.allow_enabled_experimental.clone(),
            legacy_names: config.legacy_names.clone(),
        }
    }
}
