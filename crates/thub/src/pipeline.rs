use crate::error::TogglesError;
use thub_artifacts::{Artifacts, Generator};
use thub_catalogue::Catalogue;
use thub_domain::Snapshot;
use thub_validator::{ValidationOptions, Violation, validate};
use tracing::info;

/// Outcome of [`validate_and_generate`].
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub ok: bool,
    pub violations: Vec<Violation>,
    /// Present only when `ok`: an invalid catalogue never produces artifacts.
    pub artifacts: Option<Artifacts>,
}

/// The build-time entry point: parse, validate against `prior`, and generate.
///
/// Running it on an unchanged source yields byte-identical artifacts, so generate-then-check
/// converges after one regeneration.
///
/// # Errors
/// * [`TogglesError::Catalogue`] on structural errors.
/// * [`TogglesError::Artifacts`] if generation fails.
pub fn validate_and_generate(
    source: &str,
    prior: Option<&Snapshot>,
    options: &ValidationOptions,
) -> Result<PipelineReport, TogglesError> {
    let catalogue = Catalogue::parse(source)?;
    let report = validate(&catalogue, prior, options);

    if !report.is_ok() {
        info!(violations = report.len(), "Validation failed, artifacts not generated");
        return Ok(PipelineReport { ok: false, violations: report.violations, artifacts: None });
    }

    let generator = prior.map_or_else(Generator::new, Generator::with_history);
    let artifacts = generator.generate(&catalogue)?;

    Ok(PipelineReport { ok: true, violations: Vec::new(), artifacts: Some(artifacts) })
}
