use crate::matrix;
use crate::options::ValidationOptions;
use crate::report::{ValidationReport, Violation, ViolationKind};
use fxhash::FxHashSet;
use thub_catalogue::{Catalogue, CatalogueSource};
use thub_domain::constants::{EXPRESSION_FALSE, EXPRESSION_TRUE};
use thub_domain::{FlagDefinition, Snapshot, Stage};
use tracing::{debug, info};

/// Runs every check against a loaded catalogue.
#[must_use]
pub fn validate(
    catalogue: &Catalogue,
    prior: Option<&Snapshot>,
    options: &ValidationOptions,
) -> ValidationReport {
    validate_source(catalogue.source(), prior, options)
}

/// Runs every check against raw source data, which may still contain repeated names.
///
/// Checks never short-circuit: the report holds every violation, grouped per flag in source
/// order, followed by removals and retired-ledger edits relative to `prior`.
///
/// A name retired in `prior` stays retired even if its `[[retired]]` entry was deleted.
#[must_use]
pub fn validate_source(
    source: &CatalogueSource,
    prior: Option<&Snapshot>,
    options: &ValidationOptions,
) -> ValidationReport {
    let teams: FxHashSet<&str> = source.teams.iter().map(|t| t.id.as_str()).collect();
    let listed: FxHashSet<&str> = source.retired.iter().map(|r| r.name.as_str()).collect();
    let prior_retired: &[String] = prior.map(|snapshot| snapshot.retired.as_slice()).unwrap_or_default();
    let retired: FxHashSet<&str> =
        listed.iter().copied().chain(prior_retired.iter().map(String::as_str)).collect();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut violations = Vec::new();

    for flag in &source.flags {
        let name = flag.name.as_str();

        if !is_identifier(name) && !options.is_legacy(name) {
            violations.push(Violation::new(
                name,
                ViolationKind::InvalidName,
                "name must match ^[a-z][a-zA-Z0-9]*$",
            ));
        }

        if !seen.insert(name) {
            violations.push(Violation::new(name, ViolationKind::DuplicateName, "declared more than once"));
        }

        if retired.contains(name) {
            violations.push(Violation::new(
                name,
                ViolationKind::RetiredNameReused,
                "name is recorded in the retired ledger",
            ));
        }

        if flag.owner.is_empty() {
            violations.push(Violation::new(name, ViolationKind::UnknownOwner, "owner is missing"));
        } else if !teams.contains(flag.owner.as_str()) {
            violations.push(Violation::new(
                name,
                ViolationKind::UnknownOwner,
                format!("owner '{}' is not a registered team", flag.owner),
            ));
        }

        for problem in matrix::check(flag.stage, flag.policy) {
            violations.push(Violation::new(name, ViolationKind::StagePolicy, problem));
        }

        check_defaults(flag, options, &mut violations);

        if let Some(entry) = prior.and_then(|snapshot| snapshot.entry(name))
            && flag.stage < entry.stage
        {
            violations.push(Violation::new(
                name,
                ViolationKind::StageRegression,
                format!("stage moved back from {} to {}", entry.stage, flag.stage),
            ));
        }
    }

    if let Some(snapshot) = prior {
        for entry in &snapshot.flags {
            let name = entry.name.as_str();
            if !seen.contains(name) && !retired.contains(name) {
                violations.push(Violation::new(
                    name,
                    ViolationKind::UnrecordedRemoval,
                    "removed without a [[retired]] entry",
                ));
            }
        }
    }

    for name in prior_retired.iter().map(String::as_str).filter(|name| !listed.contains(name)) {
        violations.push(Violation::new(
            name,
            ViolationKind::RetiredNameDropped,
            "retired name was deleted from the [[retired]] ledger",
        ));
    }

    for violation in &violations {
        debug!(flag = %violation.flag, kind = %violation.kind, "{}", violation.message);
    }
    info!(flags = source.flags.len(), violations = violations.len(), "Catalogue validated");

    ValidationReport { violations }
}

fn check_defaults(flag: &FlagDefinition, options: &ValidationOptions, out: &mut Vec<Violation>) {
    let name = flag.name.as_str();

    if let Some(expression) = flag.expression.as_deref()
        && expression != EXPRESSION_TRUE
        && expression != EXPRESSION_FALSE
    {
        out.push(Violation::new(
            name,
            ViolationKind::InvalidExpression,
            format!("expression '{expression}' is neither \"true\" nor \"false\""),
        ));
    }

    if flag.stage == Stage::Experimental
        && flag.explicit_default() == Some(true)
        && !options.allows_enabled_experimental(name)
    {
        out.push(Violation::new(
            name,
            ViolationKind::ExperimentalDefaultEnabled,
            "experimental flags must default to disabled",
        ));
    }
}

/// `^[a-z][a-zA-Z0-9]*$`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase()) && chars.all(|c| c.is_ascii_alphanumeric())
}
