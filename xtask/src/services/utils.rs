use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thub::domain::config::ThubConfig;
use thub_kernel::config::load_config;
use thub_logger::{FileOutput, LevelFilter, Logger};

const WORKSPACE_CONFIG: &str = "toggles.toml";

/// Returns the root directory of the project.
///
/// # Errors
/// Returns an error if the manifest directory does not have a parent.
pub fn get_project_root() -> Result<PathBuf> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .context("Could not find project root from xtask manifest")
}

/// Loads the toggle config.
///
/// Without `--config`, `toggles.toml` at the workspace root is used when it exists, else the
/// built-in defaults. Relative paths inside the config are anchored at the config's directory
/// (the workspace root for defaults).
///
/// # Errors
/// Returns an error if an explicitly named or discovered config file cannot be loaded.
pub fn load_settings(path: Option<&Path>) -> Result<ThubConfig> {
    let root = get_project_root()?;

    let (mut config, base) = match path {
        Some(path) => {
            let config: ThubConfig =
                load_config(Some(path)).with_context(|| format!("Failed to load {}", path.display()))?;
            let base = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            (config, base)
        },
        None => {
            let default = root.join(WORKSPACE_CONFIG);
            if default.is_file() {
                let config: ThubConfig = load_config(Some(&default))
                    .with_context(|| format!("Failed to load {}", default.display()))?;
                (config, root)
            } else {
                (ThubConfig::default(), root)
            }
        },
    };

    let catalogue_path = anchor(&base, &config.catalogue.path);
    let artifacts_dir = anchor(&base, &config.catalogue.artifacts_dir);
    let state_dir = config.runtime.state_dir.as_deref().map(|dir| anchor(&base, dir));
    let log_dir = config.logging.dir.as_deref().map(|dir| anchor(&base, dir));

    config.catalogue.path = catalogue_path;
    config.catalogue.artifacts_dir = artifacts_dir;
    config.runtime.state_dir = state_dir;
    config.logging.dir = log_dir;

    Ok(config)
}

/// Joins relative paths onto `base`; absolute paths pass through.
#[must_use]
pub fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}

/// Installs the console logger, plus a rolling file when `logging.dir` is set.
///
/// # Errors
/// Returns an error if the logging configuration is rejected.
pub fn init_logger(config: &ThubConfig, verbose: bool) -> Result<Logger> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        config.logging.level.parse().unwrap_or(LevelFilter::INFO)
    };

    let mut builder = Logger::builder().name("xtask").console(true).level(level);
    if let Some(filter) = &config.logging.filter {
        builder = builder.env_filter(filter.clone());
    }
    if let Some(dir) = &config.logging.dir {
        let mut output = FileOutput::new(dir);
        output.json = config.logging.json;
        builder = builder.file(output);
    }

    builder.init().context("Failed to initialize logging")
}
