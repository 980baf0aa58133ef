use crate::constants::EXPRESSION_TRUE;
use crate::policy::PolicySet;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Lifecycle maturity, ordered by increasing stability guarantee.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Stage {
    Experimental,
    PrivatePreview,
    PublicPreview,
    GeneralAvailability,
    Deprecated,
}

impl Stage {
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Human-readable heading used in generated documentation.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Experimental => "Experimental",
            Self::PrivatePreview => "Private preview",
            Self::PublicPreview => "Public preview",
            Self::GeneralAvailability => "General availability",
            Self::Deprecated => "Deprecated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FlagState {
    Disabled,
    Enabled,
}

impl FlagState {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for FlagState {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

impl From<FlagState> for bool {
    fn from(state: FlagState) -> Self {
        state.is_enabled()
    }
}

/// A single flag of the catalogue. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FlagRecord", into = "FlagRecord")]
pub struct FlagDefinition {
    pub name: String,
    pub description: String,
    pub stage: Stage,
    pub owner: String,
    pub policy: PolicySet,
    pub expression: Option<String>,
    pub enabled: Option<bool>,
}

impl FlagDefinition {
    pub fn new(name: impl Into<String>, stage: Stage, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            stage,
            owner: owner.into(),
            policy: PolicySet::empty(),
            expression: None,
            enabled: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PolicySet) -> Self {
        self.policy |= policy;
        self
    }

    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub const fn has(&self, policy: PolicySet) -> bool {
        self.policy.contains(policy)
    }

    /// Explicit default: `enabled` first, then a `"true"` expression.
    /// `None` when the flag declares neither.
    #[must_use]
    pub fn explicit_default(&self) -> Option<bool> {
        self.enabled.or_else(|| self.expression.as_deref().map(|expr| expr == EXPRESSION_TRUE))
    }
}

/// Flat on-disk form of a [`FlagDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FlagRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub stage: Stage,
    #[serde(default)]
    pub owner: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub frontend_only: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_license: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_dev_mode: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_restart: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hide_from_docs: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub expose_to_frontend: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub restart_acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl From<FlagRecord> for FlagDefinition {
    fn from(record: FlagRecord) -> Self {
        let mut policy = PolicySet::empty();
        policy.set(PolicySet::FRONTEND_ONLY, record.frontend_only);
        policy.set(PolicySet::REQUIRES_LICENSE, record.requires_license);
        policy.set(PolicySet::REQUIRES_DEV_MODE, record.requires_dev_mode);
        policy.set(PolicySet::REQUIRES_RESTART, record.requires_restart);
        policy.set(PolicySet::HIDE_FROM_DOCS, record.hide_from_docs);
        policy.set(PolicySet::EXPOSE_TO_FRONTEND, record.expose_to_frontend);
        policy.set(PolicySet::RESTART_ACKNOWLEDGED, record.restart_acknowledged);

        Self {
            name: record.name,
            description: record.description,
            stage: record.stage,
            owner: record.owner,
            policy,
            expression: record.expression,
            enabled: record.enabled,
        }
    }
}

impl From<FlagDefinition> for FlagRecord {
    fn from(flag: FlagDefinition) -> Self {
        let policy = flag.policy;
        Self {
            name: flag.name,
            description: flag.description,
            stage: flag.stage,
            owner: flag.owner,
            frontend_only: policy.contains(PolicySet::FRONTEND_ONLY),
            requires_license: policy.contains(PolicySet::REQUIRES_LICENSE),
            requires_dev_mode: policy.contains(PolicySet::REQUIRES_DEV_MODE),
            requires_restart: policy.contains(PolicySet::REQUIRES_RESTART),
            hide_from_docs: policy.contains(PolicySet::HIDE_FROM_DOCS),
            expose_to_frontend: policy.contains(PolicySet::EXPOSE_TO_FRONTEND),
            restart_acknowledged: policy.contains(PolicySet::RESTART_ACKNOWLEDGED),
            expression: flag.expression,
            enabled: flag.enabled,
        }
    }
}
