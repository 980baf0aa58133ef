use crate::artifacts::{ArtifactKind, Artifacts, CheckedInArtifacts};
use crate::error::ArtifactsError;
use crate::render;
use serde::Serialize;
use std::fmt;
use strum_macros::Display;
use thub_catalogue::Catalogue;
use thub_domain::Snapshot;
use thub_resolver::DefaultResolver;
use tracing::{info, warn};

/// Deterministic catalogue-to-artifacts transform.
///
/// Defaults are computed with the prior snapshot's history so Deprecated flags keep their last
/// recorded default across regenerations.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    defaults: DefaultResolver,
}

impl Generator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_history(prior: &Snapshot) -> Self {
        Self { defaults: DefaultResolver::with_history(prior) }
    }

    /// # Errors
    /// Fails only if the catalogue cannot be canonicalized or encoded.
    pub fn generate(&self, catalogue: &Catalogue) -> Result<Artifacts, ArtifactsError> {
        let artifacts = Artifacts {
            docs: render::docs(catalogue, &self.defaults),
            frontend: render::frontend(catalogue)?,
            schema: render::schema(catalogue, &self.defaults)?,
            snapshot: render::snapshot(catalogue, &self.defaults)?,
        };
        info!(flags = catalogue.len(), "Artifacts generated");
        Ok(artifacts)
    }

    /// The snapshot value [`Self::generate`] would write.
    ///
    /// # Errors
    /// Fails only if the catalogue cannot be canonicalized.
    pub fn snapshot(&self, catalogue: &Catalogue) -> Result<Snapshot, ArtifactsError> {
        render::snapshot_value(catalogue, &self.defaults)
    }
}

/// [`Generator::generate`] without history.
///
/// # Errors
/// See [`Generator::generate`].
pub fn generate(catalogue: &Catalogue) -> Result<Artifacts, ArtifactsError> {
    Generator::new().generate(catalogue)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum DriftReason {
    Missing,
    Modified,
}

/// A checked-in artifact that does not match the regenerated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Drift {
    pub artifact: ArtifactKind,
    pub reason: DriftReason,
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}; regenerate it", self.artifact.file_name(), self.reason)
    }
}

/// Regenerates in memory and compares byte-for-byte with the checked-in copies (line endings
/// normalized). History comes from the checked-in snapshot itself, so a freshly generated set is
/// always a fixed point.
///
/// Returns the drifted artifacts; empty means consistent.
///
/// # Errors
/// Fails if the checked-in snapshot is corrupt or regeneration fails.
pub fn consistency_check(
    catalogue: &Catalogue,
    checked_in: &CheckedInArtifacts,
) -> Result<Vec<Drift>, ArtifactsError> {
    let generator = checked_in.snapshot()?.map_or_else(Generator::new, |prior| Generator::with_history(&prior));
    let expected = generator.generate(catalogue)?;

    let drifts: Vec<Drift> = expected
        .iter()
        .filter_map(|(artifact, want)| {
            let reason = match checked_in.get(artifact) {
                None => DriftReason::Missing,
                Some(have) if normalize(have) != want => DriftReason::Modified,
                Some(_) => return None,
            };
            Some(Drift { artifact, reason })
        })
        .collect();

    for drift in &drifts {
        warn!(artifact = %drift.artifact, reason = %drift.reason, "Generated artifact drifted");
    }
    Ok(drifts)
}

fn normalize(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains('\r') { text.replace("\r\n", "\n").into() } else { text.into() }
}
