use crate::error::{ArtifactsError, ArtifactsErrorExt};
use fxhash::FxHashMap;
use serde::Serialize;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use thub_domain::constants::{DOCS_FILE, FRONTEND_FILE, SCHEMA_FILE, SNAPSHOT_FILE};
use thub_domain::Snapshot;
use thub_storage::{Storage, StorageError};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ArtifactKind {
    Docs,
    Frontend,
    Schema,
    Snapshot,
}

impl ArtifactKind {
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Docs => DOCS_FILE,
            Self::Frontend => FRONTEND_FILE,
            Self::Schema => SCHEMA_FILE,
            Self::Snapshot => SNAPSHOT_FILE,
        }
    }
}

/// The generated files, byte-exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub docs: String,
    pub frontend: String,
    pub schema: String,
    pub snapshot: String,
}

impl Artifacts {
    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Docs => &self.docs,
            ArtifactKind::Frontend => &self.frontend,
            ArtifactKind::Schema => &self.schema,
            ArtifactKind::Snapshot => &self.snapshot,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArtifactKind, &str)> {
        ArtifactKind::iter().map(|kind| (kind, self.get(kind)))
    }

    /// Writes every artifact atomically into `dir`, creating it if needed.
    ///
    /// # Errors
    /// Returns [`ArtifactsError::Storage`] if a file cannot be written.
    pub async fn write_to(&self, dir: impl AsRef<Path>) -> Result<(), ArtifactsError> {
        let dir = dir.as_ref();
        let storage = Storage::builder().root(dir).open().await?;

        for (kind, content) in self.iter() {
            storage
                .write(kind.file_name(), content.as_bytes())
                .await
                .context(format!("writing {kind}"))?;
        }

        info!(dir = %storage.root().display(), "Artifacts written");
        Ok(())
    }
}

/// Artifacts as found on disk. Absent files are simply missing from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckedInArtifacts {
    files: FxHashMap<ArtifactKind, String>,
}

impl CheckedInArtifacts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, kind: ArtifactKind, content: impl Into<String>) -> Self {
        self.files.insert(kind, content.into());
        self
    }

    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> Option<&str> {
        self.files.get(&kind).map(String::as_str)
    }

    /// Reads whatever artifacts exist in `dir`. A missing directory yields an empty set.
    ///
    /// # Errors
    /// * [`ArtifactsError::Storage`] if a file exists but cannot be read.
    /// * [`ArtifactsError::Encoding`] if a file is not UTF-8.
    pub async fn read_from(dir: impl AsRef<Path>) -> Result<Self, ArtifactsError> {
        let dir = dir.as_ref();
        let storage = match Storage::builder().root(dir).create(false).open().await {
            Ok(storage) => storage,
            Err(StorageError::DirectoryNotFound { .. }) => {
                debug!(dir = %dir.display(), "No checked-in artifacts");
                return Ok(Self::default());
            },
            Err(err) => return Err(err.into()),
        };

        let mut files = FxHashMap::default();
        for kind in ArtifactKind::iter() {
            if let Some(bytes) = storage.read(kind.file_name()).await? {
                let text = String::from_utf8(bytes).context(kind.file_name())?;
                files.insert(kind, text);
            }
        }

        Ok(Self { files })
    }

    /// The checked-in snapshot. `None` when there is none yet.
    ///
    /// # Errors
    /// Returns [`ArtifactsError::Json`] if `snapshot.json` exists but does not parse: a broken
    /// baseline must not silently disable the history checks.
    pub fn snapshot(&self) -> Result<Option<Snapshot>, ArtifactsError> {
        self.get(ArtifactKind::Snapshot)
            .map(|text| serde_json::from_str(text).context(SNAPSHOT_FILE))
            .transpose()
    }
}

impl From<&Artifacts> for CheckedInArtifacts {
    fn from(artifacts: &Artifacts) -> Self {
        Self { files: artifacts.iter().map(|(kind, text)| (kind, text.to_owned())).collect() }
    }
}
