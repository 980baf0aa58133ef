use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const TMP_MARKER: &str = ".thubtmp.";

#[derive(Debug)]
pub(crate) struct StorageInner {
    /// Canonical physical root.
    pub(crate) root: PathBuf,
    /// Source of unique temporary file names.
    pub(crate) tmp_counter: AtomicU64,
}

/// A cheaply clonable handle to the document store.
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Storage {
    #[must_use = "The store is not opened until you call .open()"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Physical path of a document.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidName`] unless the name is a single non-empty file name of
    /// ASCII alphanumerics, `-`, `_` or `.` that does not start with a dot.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        check_name(name)?;
        Ok(self.inner.root.join(name))
    }

    /// Reads a whole document, `None` if it does not exist.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidName`] or [`StorageError::Io`].
    pub async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.resolve(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", path.display()).into()),
            }),
        }
    }

    /// Replaces a document atomically (temp file, `fsync`, rename, directory sync).
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidName`] or [`StorageError::Io`].
    pub async fn write(&self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve(name)?;
        let counter = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let temp = self.inner.root.join(format!("{name}{TMP_MARKER}{counter}"));

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(data).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &target).await {
            if err.kind() != ErrorKind::AlreadyExists {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Atomic swap failed: {}", target.display()).into()),
                });
            }
            fs::remove_file(&target)
                .await
                .context(format!("Failed to replace existing file: {}", target.display()))?;
            fs::rename(&temp, &target)
                .await
                .context(format!("Atomic swap failed: {}", target.display()))?;
        }

        self.sync_root().await;
        debug!(path = %target.display(), bytes = data.len(), "Document saved atomically");
        Ok(())
    }

    /// Removes temporary files left behind by interrupted writes.
    pub async fn purge_tmp(&self) {
        let mut entries = match fs::read_dir(&self.inner.root).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "Temp file cleanup skipped");
                return;
            },
        };

        let mut removed = 0usize;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_tmp = entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER));
            if is_tmp && fs::remove_file(entry.path()).await.is_ok() {
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(removed, "Cleaned up temporary files");
        }
    }

    async fn sync_root(&self) {
        match fs::File::open(&self.inner.root).await {
            Ok(dir) => {
                if let Err(err) = dir.sync_all().await {
                    warn!(error = %err, "Directory sync failed");
                }
            },
            Err(err) => warn!(error = %err, "Directory open failed"),
        }
    }
}

fn check_name(name: &str) -> Result<(), StorageError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(TMP_MARKER)
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName {
            message: name.to_owned().into(),
            context: Some("Document names must be plain file names".into()),
        })
    }
}
