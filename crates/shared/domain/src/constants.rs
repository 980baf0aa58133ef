/// Prefix of environment overrides (`THUB__RUNTIME__DEV_MODE=true`).
pub const ENV_PREFIX: &str = "THUB";
/// Config file looked up when no path is given (extension resolved by the `config` crate).
pub const DEFAULT_CONFIG_FILE: &str = "toggles";

pub const DOCS_FILE: &str = "toggles.md";
pub const FRONTEND_FILE: &str = "frontend.json";
pub const SCHEMA_FILE: &str = "schema.json";
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Document name of the override ledger inside the runtime state directory.
pub const LEDGER_FILE: &str = "overrides.json";

/// The only expression values that carry meaning.
pub const EXPRESSION_TRUE: &str = "true";
pub const EXPRESSION_FALSE: &str = "false";
