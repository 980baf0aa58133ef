use std::collections::BTreeMap;
use thub_catalogue::Catalogue;
use thub_resolver::{
    DefaultResolver, Gate, Ledger, Origin, OverrideResolver, OverrideStore, ResolveContext, ResolverError,
    SetOutcome, SourceKind,
};
use thub_storage::Storage;
use thub_validator::{ValidatedCatalogue, ValidationOptions};

const SOURCE: &str = r#"
[[team]]
id = "core"

[[flag]]
name = "trimDefaults"
stage = "publicPreview"
owner = "core"

[[flag]]
name = "useCachingService"
stage = "generalAvailability"
owner = "core"
requiresRestart = true
expression = "true"

[[flag]]
name = "publicDashboardsEmailSharing"
stage = "publicPreview"
owner = "core"
requiresLicense = true
hideFromDocs = true
"#;

fn validated() -> ValidatedCatalogue {
    let catalogue = Catalogue::parse(SOURCE).unwrap();
    ValidatedCatalogue::new(catalogue, None, &ValidationOptions::default()).unwrap()
}

async fn resolver(ledger: Ledger, operator: &[(&str, bool)]) -> OverrideResolver {
    let operator: BTreeMap<String, bool> = operator.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect();
    let store = OverrideStore::open(ledger).await.unwrap();
    OverrideResolver::new(validated(), &DefaultResolver::new(), operator, store)
}

fn enabled(resolver: &OverrideResolver, name: &str, ctx: &ResolveContext) -> bool {
    resolver.resolve(name, ctx).unwrap().is_enabled()
}

#[tokio::test]
async fn admin_override_beats_operator_config() {
    let resolver = resolver(Ledger::memory(), &[("trimDefaults", false)]).await;
    let ctx = ResolveContext::default();

    let before = resolver.resolve("trimDefaults", &ctx).unwrap();
    assert_eq!(before.origin, Origin::Override(SourceKind::Operator));
    assert!(!before.is_enabled());

    assert_eq!(resolver.set_override("trimDefaults", true).await.unwrap(), SetOutcome::Applied);
    let after = resolver.resolve("trimDefaults", &ctx).unwrap();
    assert_eq!(after.origin, Origin::Override(SourceKind::Admin));
    assert!(after.is_enabled());
}

#[tokio::test]
async fn clearing_falls_back_to_lower_sources() {
    let resolver = resolver(Ledger::memory(), &[("trimDefaults", true)]).await;
    let ctx = ResolveContext::default();

    resolver.set_override("trimDefaults", false).await.unwrap();
    assert!(!enabled(&resolver, "trimDefaults", &ctx));

    assert_eq!(resolver.clear_override("trimDefaults").await.unwrap(), SetOutcome::Applied);
    assert!(enabled(&resolver, "trimDefaults", &ctx));
}

#[tokio::test]
async fn license_gate_ignores_admin_enable() {
    let resolver = resolver(Ledger::memory(), &[]).await;
    resolver.set_override("publicDashboardsEmailSharing", true).await.unwrap();

    let unlicensed = resolver.resolve("publicDashboardsEmailSharing", &ResolveContext::default()).unwrap();
    assert!(!unlicensed.is_enabled());
    assert_eq!(unlicensed.gate, Some(Gate::License));

    let licensed = ResolveContext::builder().license_valid(true).build();
    assert!(enabled(&resolver, "publicDashboardsEmailSharing", &licensed));
}

#[tokio::test]
async fn restart_flag_override_is_pending_until_reload() {
    let ledger = Ledger::memory();
    let ctx = ResolveContext::default();

    let first = resolver(ledger.clone(), &[]).await;
    assert!(enabled(&first, "useCachingService", &ctx));

    assert_eq!(first.set_override("useCachingService", false).await.unwrap(), SetOutcome::Pending);
    assert!(enabled(&first, "useCachingService", &ctx));
    assert_eq!(first.store().snapshot().pending.get("useCachingService"), Some(&Some(false)));

    drop(first);
    let restarted = resolver(ledger.clone(), &[]).await;
    assert!(!enabled(&restarted, "useCachingService", &ctx));

    // Becomes active once: a second restart keeps the value without re-promoting.
    drop(restarted);
    let again = resolver(ledger, &[]).await;
    assert!(!enabled(&again, "useCachingService", &ctx));
    assert!(again.store().snapshot().pending.is_empty());
}

#[tokio::test]
async fn pending_state_survives_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = ResolveContext::default();

    {
        let storage = Storage::builder().root(dir.path()).open().await.unwrap();
        let first = resolver(Ledger::File(storage), &[]).await;
        first.set_override("useCachingService", false).await.unwrap();
        first.set_override("trimDefaults", true).await.unwrap();
        assert!(enabled(&first, "useCachingService", &ctx));
    }

    let storage = Storage::builder().root(dir.path()).open().await.unwrap();
    let restarted = resolver(Ledger::File(storage), &[]).await;
    assert!(!enabled(&restarted, "useCachingService", &ctx));
    assert!(enabled(&restarted, "trimDefaults", &ctx));
}

#[tokio::test]
async fn request_overrides_win_except_for_restart_flags() {
    let resolver = resolver(Ledger::memory(), &[]).await;
    resolver.set_override("trimDefaults", true).await.unwrap();

    let ctx = ResolveContext::default()
        .with_request("trimDefaults", false)
        .with_request("useCachingService", false);

    let trim = resolver.resolve("trimDefaults", &ctx).unwrap();
    assert_eq!(trim.origin, Origin::Override(SourceKind::Request));
    assert!(!trim.is_enabled());

    assert!(enabled(&resolver, "useCachingService", &ctx));
}

#[tokio::test]
async fn unknown_flags() {
    let resolver = resolver(Ledger::memory(), &[("ghost", true)]).await;

    assert!(resolver.resolve("ghost", &ResolveContext::default()).is_none());
    let err = resolver.set_override("ghost", true).await.unwrap_err();
    assert!(matches!(err, ResolverError::UnknownFlag { .. }));
    assert_eq!(err.to_string(), "Unknown flag (admin override): ghost");
}

#[tokio::test]
async fn corrupted_ledger_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("overrides.json"), b"not json").unwrap();

    let storage = Storage::builder().root(dir.path()).open().await.unwrap();
    let err = OverrideStore::open(Ledger::File(storage)).await.unwrap_err();
    assert!(matches!(err, ResolverError::Ledger { .. }));
}
