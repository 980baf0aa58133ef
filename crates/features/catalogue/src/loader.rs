use crate::catalogue::Catalogue;
use crate::error::{CatalogueError, CatalogueErrorExt};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::info;

/// Reads and parses the catalogue, bounded by `timeout`.
///
/// # Errors
/// * [`CatalogueError::Timeout`] if reading does not finish in time.
/// * [`CatalogueError::Io`] if the file cannot be read.
/// * Any structural error from [`Catalogue::parse`].
pub async fn load_catalogue(
    path: impl AsRef<Path>,
    timeout: Duration,
) -> Result<Catalogue, CatalogueError> {
    let path = path.as_ref();

    let text = tokio::time::timeout(timeout, fs::read_to_string(path))
        .await
        .map_err(|_| CatalogueError::Timeout {
            message: format!("{} not read within {}ms", path.display(), timeout.as_millis()).into(),
            context: None,
        })?
        .context(format!("Failed to read catalogue: {}", path.display()))?;

    let catalogue = Catalogue::parse(&text).context(path.display().to_string())?;

    info!(
        path = %path.display(),
        flags = catalogue.len(),
        teams = catalogue.teams().len(),
        retired = catalogue.retired().len(),
        "Catalogue loaded"
    );

    Ok(catalogue)
}
