use fxhash::FxHashMap;
use typed_builder::TypedBuilder;

/// Per-call inputs of the override resolver.
///
/// ```rust
/// use thub_resolver::ResolveContext;
///
/// let ctx = ResolveContext::builder().license_valid(true).build().with_request("trimDefaults", true);
/// assert_eq!(ctx.request("trimDefaults"), Some(true));
/// ```
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ResolveContext {
    /// A valid license is present.
    #[builder(default)]
    pub license_valid: bool,
    /// The process runs in developer mode.
    #[builder(default)]
    pub dev_mode: bool,
    /// Request-scoped overrides, the highest-precedence source.
    #[builder(default)]
    pub overrides: FxHashMap<String, bool>,
}

impl ResolveContext {
    #[must_use]
    pub fn with_request(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.overrides.insert(name.into(), enabled);
        self
    }

    #[must_use]
    pub fn request(&self, name: &str) -> Option<bool> {
        self.overrides.get(name).copied()
    }
}
