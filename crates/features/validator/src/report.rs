use serde::Serialize;
use std::fmt;
use strum_macros::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ViolationKind {
    InvalidName,
    DuplicateName,
    StagePolicy,
    ExperimentalDefaultEnabled,
    InvalidExpression,
    StageRegression,
    RetiredNameReused,
    RetiredNameDropped,
    UnrecordedRemoval,
    UnknownOwner,
}

/// A single consistency problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub flag: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub(crate) fn new(flag: &str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self { flag: flag.to_owned(), kind, message: message.into() }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.flag, self.message)
    }
}

/// Every violation found in one run, in catalogue order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Catalogue has {} consistency violation(s)", .violations.len())]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    pub fn for_flag<'a>(&'a self, flag: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.flag == flag)
    }
}
