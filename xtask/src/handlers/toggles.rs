use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use thub::artifacts::{CheckedInArtifacts, consistency_check};
use thub::catalogue::Catalogue;
use thub::domain::config::ThubConfig;
use thub::validator::{ValidationOptions, Violation};
use thub::{PipelineReport, validate_and_generate};
use tracing::debug;

/// Where the catalogue and its checked-in artifacts live for this run.
#[derive(Debug, Clone)]
pub struct TogglePaths {
    pub catalogue: PathBuf,
    pub artifacts_dir: PathBuf,
}

impl TogglePaths {
    #[must_use]
    pub fn resolve(config: &ThubConfig, catalogue: Option<&Path>) -> Self {
        Self {
            catalogue: catalogue.map_or_else(|| config.catalogue.path.clone(), Path::to_path_buf),
            artifacts_dir: config.catalogue.artifacts_dir.clone(),
        }
    }
}

/// Validates the catalogue and rewrites every generated artifact.
///
/// # Errors
/// Returns an error on structural failures, violations, or when the artifacts cannot be written.
pub async fn generate(config: &ThubConfig, paths: &TogglePaths) -> Result<()> {
    let (source, checked_in) = read_inputs(paths).await?;
    let report = run_pipeline(config, &source, &checked_in)?;

    let Some(artifacts) = report.artifacts else {
        bail!("Validation passed but no artifacts were produced");
    };
    artifacts.write_to(&paths.artifacts_dir).await?;

    println!("✅ Wrote {} artifacts to {}", artifacts.iter().count(), paths.artifacts_dir.display());
    Ok(())
}

/// Validates the catalogue and compares the checked-in artifacts with a fresh generation.
///
/// # Errors
/// Returns an error on violations or when any artifact drifted.
pub async fn check(config: &ThubConfig, paths: &TogglePaths) -> Result<()> {
    let (source, checked_in) = read_inputs(paths).await?;
    run_pipeline(config, &source, &checked_in)?;

    let catalogue = Catalogue::parse(&source)?;
    let drifts = consistency_check(&catalogue, &checked_in)?;
    if !drifts.is_empty() {
        for drift in &drifts {
            eprintln!("❌ {drift}");
        }
        bail!("{} generated artifact(s) out of date; run `cargo xtask toggles generate`", drifts.len());
    }

    println!("✅ Generated artifacts are up to date");
    Ok(())
}

/// Validates the catalogue against the checked-in snapshot without writing anything.
///
/// # Errors
/// Returns an error on structural failures or violations.
pub async fn validate(config: &ThubConfig, paths: &TogglePaths) -> Result<()> {
    let (source, checked_in) = read_inputs(paths).await?;
    run_pipeline(config, &source, &checked_in)?;

    println!("✅ {} is consistent", paths.catalogue.display());
    Ok(())
}

async fn read_inputs(paths: &TogglePaths) -> Result<(String, CheckedInArtifacts)> {
    debug!(catalogue = %paths.catalogue.display(), artifacts = %paths.artifacts_dir.display(), "Reading inputs");

    let source = tokio::fs::read_to_string(&paths.catalogue)
        .await
        .with_context(|| format!("Failed to read {}", paths.catalogue.display()))?;
    let checked_in = CheckedInArtifacts::read_from(&paths.artifacts_dir).await?;
    Ok((source, checked_in))
}

fn run_pipeline(config: &ThubConfig, source: &str, checked_in: &CheckedInArtifacts) -> Result<PipelineReport> {
    let prior = checked_in.snapshot()?;
    let options = ValidationOptions::from(&config.validator);
    let report = validate_and_generate(source, prior.as_ref(), &options)?;

    if !report.ok {
        print_violations(&report.violations);
        bail!("Catalogue has {} consistency violation(s)", report.violations.len());
    }
    Ok(report)
}

fn print_violations(violations: &[Violation]) {
    for violation in violations {
        eprintln!("❌ {violation}");
    }
}
