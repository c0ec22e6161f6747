use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use super::{KeyValueStorage, StorageError};

type Document = BTreeMap<String, String>;

/// File-backed key-value storage.
///
/// All keys live in one JSON object on disk (`{"key": "value", ...}`). A
/// missing file reads as an empty store. Writes go to a sibling temporary file
/// which is then renamed over the original, so readers never see a partially
/// written document.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a storage backed by the file at `path`.
    ///
    /// The file and its parent directories are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Document::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                tracing::warn!(
                    path = %tmp_path.display(),
                    error = %cleanup,
                    "Failed to remove temporary file"
                );
            }
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display(), bytes = value.len()))]
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        document.insert(key.to_owned(), value.to_owned());
        self.write_document(&document).await?;

        tracing::debug!("Stored item");
        Ok(())
    }
}
