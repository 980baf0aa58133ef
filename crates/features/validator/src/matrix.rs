//! Stage-policy compatibility matrix.
//!
//! Every stage names the policy bits it permits and the conditional requirements that apply when
//! a bit is set. Adding a stage or a policy dimension only touches [`rule`].

use thub_domain::{PolicySet, Stage};

const ALL: PolicySet = PolicySet::all();
const NO_DEV_MODE: PolicySet = PolicySet::all().difference(PolicySet::REQUIRES_DEV_MODE);

/// `(when, requires)`: if `when` is set, every bit of `requires` must be set too.
pub type Requirement = (PolicySet, PolicySet);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRule {
    pub permitted: PolicySet,
    pub conditional: &'static [Requirement],
}

const DEPRECATED_REQUIRES: &[Requirement] =
    &[(PolicySet::REQUIRES_RESTART, PolicySet::RESTART_ACKNOWLEDGED)];

#[must_use]
pub const fn rule(stage: Stage) -> StageRule {
    match stage {
        Stage::Experimental | Stage::PrivatePreview => {
            StageRule { permitted: ALL, conditional: &[] }
        },
        Stage::PublicPreview | Stage::GeneralAvailability => {
            StageRule { permitted: NO_DEV_MODE, conditional: &[] }
        },
        Stage::Deprecated => StageRule { permitted: NO_DEV_MODE, conditional: DEPRECATED_REQUIRES },
    }
}

/// Human-readable problems of `policy` under `stage`; empty when compatible.
#[must_use]
pub fn check(stage: Stage, policy: PolicySet) -> Vec<String> {
    let rule = rule(stage);
    let mut problems = Vec::new();

    let forbidden = policy.difference(rule.permitted);
    if !forbidden.is_empty() {
        problems.push(format!(
            "{} not permitted at stage {stage}",
            forbidden.field_names().join(", ")
        ));
    }

    for (when, requires) in rule.conditional {
        if policy.contains(*when) && !policy.contains(*requires) {
            problems.push(format!(
                "{} at stage {stage} requires {}",
                when.field_names().join(", "),
                requires.field_names().join(", ")
            ));
        }
    }

    problems
}
