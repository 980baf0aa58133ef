use crate::context::ResolveContext;
use serde::Serialize;
use std::collections::BTreeMap;
use strum_macros::Display;
use thub_domain::{FlagDefinition, FlagState, PolicySet};
use tracing::debug;

/// Override sources in ascending precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    /// Static operator configuration.
    Operator,
    /// Runtime admin store.
    Admin,
    /// Request-scoped context.
    Request,
}

/// Where the pre-gate value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "source")]
pub enum Origin {
    Default,
    Override(SourceKind),
}

/// A policy gate that forced the flag off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Gate {
    License,
    DevMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub state: FlagState,
    pub origin: Origin,
    pub gate: Option<Gate>,
}

impl Resolution {
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }
}

/// Override values visible to one resolution, lowest precedence first.
#[derive(Debug, Clone, Copy)]
pub struct OverrideSources<'a> {
    pub operator: &'a BTreeMap<String, bool>,
    pub admin: &'a BTreeMap<String, bool>,
}

/// Resolves the effective state of `flag`.
///
/// The highest source holding a value wins over `default`. Request overrides are not consulted
/// for restart-gated flags. License and dev-mode gates force Disabled whatever the value.
#[must_use]
pub fn resolve(
    flag: &FlagDefinition,
    default: FlagState,
    sources: OverrideSources<'_>,
    ctx: &ResolveContext,
) -> Resolution {
    let name = flag.name.as_str();
    let restart_gated = flag.has(PolicySet::REQUIRES_RESTART);

    let request = if restart_gated { None } else { ctx.request(name) };
    let candidates = [
        (SourceKind::Request, request),
        (SourceKind::Admin, sources.admin.get(name).copied()),
        (SourceKind::Operator, sources.operator.get(name).copied()),
    ];

    let (state, origin) = candidates
        .into_iter()
        .find_map(|(kind, value)| value.map(|v| (FlagState::from(v), Origin::Override(kind))))
        .unwrap_or((default, Origin::Default));

    let gate = if flag.has(PolicySet::REQUIRES_LICENSE) && !ctx.license_valid {
        Some(Gate::License)
    } else if flag.has(PolicySet::REQUIRES_DEV_MODE) && !ctx.dev_mode {
        Some(Gate::DevMode)
    } else {
        None
    };

    match gate {
        Some(gate) => {
            debug!(flag = name, %gate, would_be = %state, "Policy gate forced flag disabled");
            Resolution { state: FlagState::Disabled, origin, gate: Some(gate) }
        },
        None => Resolution { state, origin, gate: None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thub_domain::Stage;

    fn map(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
        entries.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
    }

    #[test]
    fn admin_beats_operator() {
        let flag = FlagDefinition::new("f", Stage::GeneralAvailability, "core");
        let operator = map(&[("f", false)]);
        let admin = map(&[("f", true)]);
        let sources = OverrideSources { operator: &operator, admin: &admin };

        let res = resolve(&flag, FlagState::Disabled, sources, &ResolveContext::default());
        assert_eq!(res.state, FlagState::Enabled);
        assert_eq!(res.origin, Origin::Override(SourceKind::Admin));
    }

    #[test]
    fn request_beats_admin() {
        let flag = FlagDefinition::new("f", Stage::GeneralAvailability, "core");
        let empty = BTreeMap::new();
        let admin = map(&[("f", true)]);
        let ctx = ResolveContext::default().with_request("f", false);

        let res = resolve(&flag, FlagState::Enabled, OverrideSources { operator: &empty, admin: &admin }, &ctx);
        assert_eq!(res.state, FlagState::Disabled);
        assert_eq!(res.origin, Origin::Override(SourceKind::Request));
    }

    #[test]
    fn falls_back_to_default() {
        let flag = FlagDefinition::new("f", Stage::GeneralAvailability, "core");
        let empty = BTreeMap::new();
        let sources = OverrideSources { operator: &empty, admin: &empty };

        let res = resolve(&flag, FlagState::Enabled, sources, &ResolveContext::default());
        assert_eq!(res, Resolution { state: FlagState::Enabled, origin: Origin::Default, gate: None });
    }

    #[test]
    fn license_gate_wins_over_overrides() {
        let flag = FlagDefinition::new("f", Stage::PublicPreview, "core").with_policy(PolicySet::REQUIRES_LICENSE);
        let empty = BTreeMap::new();
        let admin = map(&[("f", true)]);
        let sources = OverrideSources { operator: &empty, admin: &admin };

        let res = resolve(&flag, FlagState::Disabled, sources, &ResolveContext::default());
        assert_eq!(res.state, FlagState::Disabled);
        assert_eq!(res.gate, Some(Gate::License));

        let licensed = ResolveContext::builder().license_valid(true).build();
        assert_eq!(resolve(&flag, FlagState::Disabled, sources, &licensed).state, FlagState::Enabled);
    }

    #[test]
    fn dev_mode_gate() {
        let flag = FlagDefinition::new("f", Stage::Experimental, "core")
            .with_policy(PolicySet::REQUIRES_DEV_MODE)
            .with_enabled(true);
        let empty = BTreeMap::new();
        let sources = OverrideSources { operator: &empty, admin: &empty };

        let res = resolve(&flag, FlagState::Enabled, sources, &ResolveContext::default());
        assert_eq!(res.gate, Some(Gate::DevMode));
        assert!(!res.is_enabled());

        let dev = ResolveContext::builder().dev_mode(true).build();
        assert!(resolve(&flag, FlagState::Enabled, sources, &dev).is_enabled());
    }

    #[test]
    fn request_overrides_skip_restart_flags() {
        let flag = FlagDefinition::new("f", Stage::GeneralAvailability, "core").with_policy(PolicySet::REQUIRES_RESTART);
        let empty = BTreeMap::new();
        let sources = OverrideSources { operator: &empty, admin: &empty };
        let ctx = ResolveContext::default().with_request("f", true);

        let res = resolve(&flag, FlagState::Disabled, sources, &ctx);
        assert_eq!(res.origin, Origin::Default);
        assert_eq!(res.state, FlagState::Disabled);
    }
}
