use thub::artifacts::{ArtifactKind, CheckedInArtifacts, DriftReason, consistency_check};
use thub::catalogue::Catalogue;
use thub::domain::Stage;
use thub::resolver::default_state;
use thub::validator::{ValidationOptions, ViolationKind};
use thub::{FlagState, TogglesError, validate_and_generate};

const SOURCE: &str = r#"
[[team]]
id = "core"

[[flag]]
name = "alpha"
stage = "experimental"
owner = "core"

[[flag]]
name = "beta"
description = "Generally available and on"
stage = "generalAvailability"
owner = "core"
expression = "true"
exposeToFrontend = true
"#;

const GAMMA: &str = r#"
[[team]]
id = "core"

[[flag]]
name = "gamma"
stage = "generalAvailability"
owner = "core"
requiresDevMode = true
"#;

#[test]
fn alpha_and_beta_defaults() {
    let catalogue = Catalogue::parse(SOURCE).unwrap();

    assert_eq!(default_state(catalogue.get("alpha").unwrap()), FlagState::Disabled);
    assert_eq!(default_state(catalogue.get("beta").unwrap()), FlagState::Enabled);
}

#[test]
fn valid_catalogue_yields_artifacts() {
    let report = validate_and_generate(SOURCE, None, &ValidationOptions::default()).unwrap();

    assert!(report.ok);
    assert!(report.violations.is_empty());
    let artifacts = report.artifacts.unwrap();
    assert!(artifacts.frontend.contains("\"beta\""));
    assert!(!artifacts.frontend.contains("\"alpha\""));
}

#[test]
fn gamma_yields_one_stage_policy_violation_and_no_artifacts() {
    let report = validate_and_generate(GAMMA, None, &ValidationOptions::default()).unwrap();

    assert!(!report.ok);
    assert!(report.artifacts.is_none());
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].kind, ViolationKind::StagePolicy);
}

#[test]
fn structural_errors_are_not_violations() {
    let err = validate_and_generate("[[flag]]\nname = 1\n", None, &ValidationOptions::default()).unwrap_err();

    assert!(matches!(err, TogglesError::Catalogue { .. }));
}

#[test]
fn generate_then_check_is_a_fixed_point() {
    let options = ValidationOptions::default();
    let first = validate_and_generate(SOURCE, None, &options).unwrap().artifacts.unwrap();

    let checked_in = CheckedInArtifacts::from(&first);
    let prior = checked_in.snapshot().unwrap().unwrap();
    let second = validate_and_generate(SOURCE, Some(&prior), &options).unwrap().artifacts.unwrap();

    assert_eq!(first, second);
    let catalogue = Catalogue::parse(SOURCE).unwrap();
    assert!(consistency_check(&catalogue, &checked_in).unwrap().is_empty());
}

#[test]
fn edited_catalogue_drifts_until_regenerated() {
    let options = ValidationOptions::default();
    let before = validate_and_generate(SOURCE, None, &options).unwrap().artifacts.unwrap();
    let checked_in = CheckedInArtifacts::from(&before);

    let edited = SOURCE.replace("Generally available and on", "Now with a new description");
    let catalogue = Catalogue::parse(&edited).unwrap();

    let drifts = consistency_check(&catalogue, &checked_in).unwrap();
    assert!(drifts.iter().any(|d| d.artifact == ArtifactKind::Docs && d.reason == DriftReason::Modified));
    assert!(drifts.iter().any(|d| d.artifact == ArtifactKind::Snapshot));
}

#[test]
fn stage_regression_against_prior_is_reported() {
    let options = ValidationOptions::default();
    let prior = CheckedInArtifacts::from(&validate_and_generate(SOURCE, None, &options).unwrap().artifacts.unwrap())
        .snapshot()
        .unwrap()
        .unwrap();
    assert_eq!(prior.entry("beta").map(|e| e.stage), Some(Stage::GeneralAvailability));

    let regressed = SOURCE.replace("stage = \"generalAvailability\"", "stage = \"publicPreview\"");
    let report = validate_and_generate(&regressed, Some(&prior), &options).unwrap();

    assert!(!report.ok);
    assert_eq!(report.violations[0].kind, ViolationKind::StageRegression);
}
