use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thub_domain::constants::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use tracing::info;

#[thub_derive::thub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file overlaid with environment overrides.
///
/// 1. **Base file**: `path`, or `toggles` (any extension the `config` crate understands) in the
///    working directory.
/// 2. **Environment**: variables prefixed with `THUB__`; nesting uses double underscores
///    (`THUB__RUNTIME__DEV_MODE=true` maps to `runtime.dev_mode`).
///
/// # Errors
/// Returns [`ConfigError::Config`] when the file is missing, a value is malformed, or the result
/// does not match `T`.
///
/// # Example
/// ```rust,no_run
/// use thub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct ToolConfig {
///     verbose: bool,
/// }
///
/// let cfg: ToolConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(environment());

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .convert_case(config::Case::Snake)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("operator.enable")
        .with_list_parse_key("validator.legacy_names")
        .with_list_parse_key("validator.allow_enabled_experimental")
}
