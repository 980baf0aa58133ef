use thub_artifacts::{ArtifactKind, CheckedInArtifacts, DriftReason, Generator, consistency_check, generate};
use thub_catalogue::Catalogue;
use thub_domain::{Snapshot, Stage};

const SOURCE: &str = r#"
[[team]]
id = "grafanaSharingSquad"

[[team]]
id = "grafanaFrontendPlatformSquad"

[[flag]]
name = "publicDashboards"
description = "Enables public dashboards"
stage = "generalAvailability"
owner = "grafanaSharingSquad"
expression = "true"

[[flag]]
name = "publicDashboardsEmailSharing"
description = "Restrict public dashboard sharing to allowed emails"
stage = "publicPreview"
owner = "grafanaSharingSquad"
requiresLicense = true
hideFromDocs = true

[[flag]]
name = "live-service-web-worker"
description = "Runs live service in a web worker"
stage = "experimental"
owner = "grafanaFrontendPlatformSquad"
frontendOnly = true

[[flag]]
name = "topnav"
description = "Enables topnav support in external plugins"
stage = "deprecated"
owner = "grafanaFrontendPlatformSquad"
exposeToFrontend = true
"#;

fn catalogue() -> Catalogue {
    Catalogue::parse(SOURCE).unwrap()
}

#[test]
fn generation_is_idempotent() {
    let catalogue = catalogue();
    assert_eq!(generate(&catalogue).unwrap(), generate(&catalogue).unwrap());
}

#[test]
fn docs_exclude_hidden_flags_and_follow_stage_order() {
    let docs = generate(&catalogue()).unwrap().docs;

    assert!(!docs.contains("publicDashboardsEmailSharing"));
    assert!(docs.contains("| `publicDashboards` | Enables public dashboards | grafanaSharingSquad | enabled |"));

    let experimental = docs.find("## Experimental").unwrap();
    let ga = docs.find("## General availability").unwrap();
    let deprecated = docs.find("## Deprecated").unwrap();
    assert!(experimental < ga && ga < deprecated);
    assert!(!docs.contains("## Public preview"));
}

#[test]
fn frontend_manifest_lists_frontend_relevant_flags() {
    let frontend: serde_json::Value = serde_json::from_str(&generate(&catalogue()).unwrap().frontend).unwrap();
    let names: Vec<&str> = frontend.as_array().unwrap().iter().map(|f| f["name"].as_str().unwrap()).collect();

    assert_eq!(names, vec!["live-service-web-worker", "topnav"]);
    assert_eq!(frontend[0]["frontendOnly"], true);
    assert_eq!(frontend[1]["frontendOnly"], false);
}

#[test]
fn schema_enumerates_every_flag() {
    let schema: serde_json::Value = serde_json::from_str(&generate(&catalogue()).unwrap().schema).unwrap();
    let flags = schema.as_array().unwrap();

    assert_eq!(flags.len(), 4);
    assert_eq!(flags[1]["name"], "publicDashboardsEmailSharing");
    assert_eq!(flags[1]["requiresLicense"], true);
    assert_eq!(flags[1]["hideFromDocs"], true);
    assert_eq!(flags[0]["defaultEnabled"], true);
    assert_eq!(flags[0]["expression"], "true");
    assert!(flags[2]["enabled"].is_null());
}

#[test]
fn snapshot_digest_tracks_the_canonical_source() {
    let snapshot: Snapshot = serde_json::from_str(&generate(&catalogue()).unwrap().snapshot).unwrap();
    assert_eq!(snapshot.digest.len(), 64);
    assert_eq!(snapshot.flags.len(), 4);
    assert!(snapshot.entry("publicDashboards").unwrap().default_enabled);

    // Formatting and comments do not change the digest; content does.
    let reformatted = Catalogue::parse(&format!("# comment\n{SOURCE}\n\n")).unwrap();
    let same: Snapshot = serde_json::from_str(&generate(&reformatted).unwrap().snapshot).unwrap();
    assert_eq!(same.digest, snapshot.digest);

    let edited = Catalogue::parse(&SOURCE.replace("Enables public dashboards", "Public dashboards")).unwrap();
    let changed: Snapshot = serde_json::from_str(&generate(&edited).unwrap().snapshot).unwrap();
    assert_ne!(changed.digest, snapshot.digest);
}

#[test]
fn deprecated_default_comes_from_history() {
    let catalogue = catalogue();
    let mut prior = Generator::new().snapshot(&catalogue).unwrap();
    for entry in &mut prior.flags {
        if entry.name == "topnav" {
            entry.default_enabled = true;
        }
    }

    let with_history = Generator::with_history(&prior).snapshot(&catalogue).unwrap();
    let topnav = with_history.entry("topnav").unwrap();
    assert_eq!(topnav.stage, Stage::Deprecated);
    assert!(topnav.default_enabled);
}

#[test]
fn fresh_artifacts_are_consistent() {
    let catalogue = catalogue();
    let artifacts = generate(&catalogue).unwrap();

    assert!(consistency_check(&catalogue, &CheckedInArtifacts::from(&artifacts)).unwrap().is_empty());
}

#[test]
fn hand_edits_and_missing_files_drift() {
    let catalogue = catalogue();
    let artifacts = generate(&catalogue).unwrap();
    let checked_in = CheckedInArtifacts::new()
        .with(ArtifactKind::Docs, format!("{}\n| `extra` | hand edit |", artifacts.docs))
        .with(ArtifactKind::Frontend, artifacts.frontend.clone())
        .with(ArtifactKind::Snapshot, artifacts.snapshot.clone());

    let drifts = consistency_check(&catalogue, &checked_in).unwrap();
    let summary: Vec<_> = drifts.iter().map(|d| (d.artifact, d.reason)).collect();
    assert_eq!(
        summary,
        vec![(ArtifactKind::Docs, DriftReason::Modified), (ArtifactKind::Schema, DriftReason::Missing)]
    );
}

#[test]
fn crlf_checkouts_are_not_drift() {
    let catalogue = catalogue();
    let artifacts = generate(&catalogue).unwrap();
    let mut checked_in = CheckedInArtifacts::new();
    for (kind, text) in artifacts.iter() {
        checked_in = checked_in.with(kind, text.replace('\n', "\r\n"));
    }

    assert!(consistency_check(&catalogue, &checked_in).unwrap().is_empty());
}

#[test]
fn catalogue_change_without_regeneration_drifts() {
    let artifacts = generate(&catalogue()).unwrap();
    let edited = Catalogue::parse(&SOURCE.replace("stage = \"experimental\"", "stage = \"privatePreview\"")).unwrap();

    let drifts = consistency_check(&edited, &CheckedInArtifacts::from(&artifacts)).unwrap();
    assert!(drifts.iter().any(|d| d.artifact == ArtifactKind::Snapshot));
    assert!(drifts.iter().any(|d| d.artifact == ArtifactKind::Docs));
}
