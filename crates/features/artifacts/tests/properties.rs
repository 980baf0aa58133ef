use proptest::prelude::*;
use thub_artifacts::{CheckedInArtifacts, consistency_check, generate};
use thub_catalogue::{Catalogue, CatalogueSource};
use thub_domain::{FlagDefinition, PolicySet, Stage, Team};

fn stage() -> impl Strategy<Value = Stage> {
    prop_oneof![
        Just(Stage::Experimental),
        Just(Stage::PrivatePreview),
        Just(Stage::PublicPreview),
        Just(Stage::GeneralAvailability),
        Just(Stage::Deprecated),
    ]
}

fn catalogue() -> impl Strategy<Value = Catalogue> {
    proptest::collection::btree_map(
        "[a-z][a-zA-Z0-9]{0,12}",
        (stage(), any::<u16>(), "[ -~]{0,24}", proptest::option::of(any::<bool>())),
        0..10,
    )
    .prop_map(|flags| {
        let flags = flags
            .into_iter()
            .map(|(name, (stage, bits, description, enabled))| FlagDefinition {
                description,
                policy: PolicySet::from_bits_truncate(bits),
                enabled,
                ..FlagDefinition::new(name, stage, "core")
            })
            .collect();
        let source = CatalogueSource {
            teams: vec![Team { id: "core".to_owned(), name: String::new() }],
            flags,
            retired: Vec::new(),
        };
        Catalogue::new(source).unwrap()
    })
}

proptest! {
    #[test]
    fn generate_is_byte_identical_across_calls(catalogue in catalogue()) {
        prop_assert_eq!(generate(&catalogue).unwrap(), generate(&catalogue).unwrap());
    }

    #[test]
    fn generate_then_check_converges(catalogue in catalogue()) {
        let artifacts = generate(&catalogue).unwrap();
        let drifts = consistency_check(&catalogue, &CheckedInArtifacts::from(&artifacts)).unwrap();
        prop_assert!(drifts.is_empty());
    }

    #[test]
    fn hidden_flags_never_reach_the_docs(catalogue in catalogue()) {
        let docs = generate(&catalogue).unwrap().docs;
        for flag in catalogue.flags() {
            let row = format!("| `{}` |", flag.name);
            prop_assert_eq!(docs.contains(&row), !flag.has(PolicySet::HIDE_FROM_DOCS));
        }
    }
}
