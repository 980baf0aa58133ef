use thub_domain::{FlagDefinition, PolicySet, Snapshot, Stage};

#[test]
fn flag_record_omits_false_policies() {
    let flag = FlagDefinition::new("useCachingService", Stage::GeneralAvailability, "grafanaOperatorExperienceSquad")
        .with_policy(PolicySet::REQUIRES_RESTART)
        .with_expression("true");

    let text = toml::to_string(&flag).unwrap();
    assert!(text.contains("requiresRestart = true"));
    assert!(text.contains("stage = \"generalAvailability\""));
    assert!(!text.contains("frontendOnly"));
    assert!(!text.contains("enabled"));
}

#[test]
fn flag_record_reads_flat_booleans() {
    let text = r#"
        name = "publicDashboardsEmailSharing"
        description = "Enables public dashboard sharing to be restricted to only allowed emails"
        stage = "publicPreview"
        owner = "grafanaSharingSquad"
        requiresLicense = true
        hideFromDocs = true
    "#;

    let flag: FlagDefinition = toml::from_str(text).unwrap();
    assert_eq!(flag.stage, Stage::PublicPreview);
    assert_eq!(flag.policy, PolicySet::REQUIRES_LICENSE | PolicySet::HIDE_FROM_DOCS);
    assert_eq!(flag.expression, None);
}

#[test]
fn unknown_fields_and_stages_are_rejected() {
    let unknown = "name = \"a\"\nstage = \"experimental\"\nowner = \"t\"\nrequiresMagic = true\n";
    assert!(toml::from_str::<FlagDefinition>(unknown).is_err());

    let bad_stage = "name = \"a\"\nstage = \"beta\"\nowner = \"t\"\n";
    assert!(toml::from_str::<FlagDefinition>(bad_stage).is_err());
}

#[test]
fn snapshot_uses_camel_case_keys() {
    let json = r#"{
        "digest": "abc",
        "flags": [
            { "name": "topnav", "stage": "deprecated", "owner": "grafanaFrontendPlatformSquad", "defaultEnabled": true }
        ]
    }"#;

    let snapshot: Snapshot = serde_json::from_str(json).unwrap();
    let entry = snapshot.entry("topnav").unwrap();
    assert!(entry.default_enabled);
    assert!(!entry.requires_restart);
    assert!(snapshot.entry("missing").is_none());
}
