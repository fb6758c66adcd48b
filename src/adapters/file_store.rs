use crate::adapters::memory_store::MemoryExceptionStore;
use crate::domain::model::{DeclensionRequest, ExceptionEntry, ExceptionUpdate, NewException};
use crate::domain::ports::ExceptionStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Exception table kept in memory and written back to a JSON file after
/// every change.
#[derive(Debug)]
pub struct FileExceptionStore {
    path: PathBuf,
    inner: MemoryExceptionStore,
    write_lock: Mutex<()>,
}

impl FileExceptionStore {
    /// Opens the file at `path`, starting empty when it does not exist yet.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries: Vec<ExceptionEntry> = match tokio::fs::read(&path).await {
            Ok(data) => serde_json::from_slice(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No exceptions file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Loaded {} exceptions from {}", entries.len(), path.display());

        Ok(Self {
            path,
            inner: MemoryExceptionStore::from_entries(entries),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `staged` to a sibling temp file and renames it over the
    /// exceptions file, so a failed write leaves the old file intact.
    async fn persist(&self, staged: &MemoryExceptionStore) -> Result<()> {
        let entries = staged.snapshot().await;
        let data = serde_json::to_vec_pretty(&entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, &data).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            tracing::warn!("Could not replace {}: {}", self.path.display(), e);
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        tracing::debug!("Wrote {} exceptions ({} bytes) to {}", entries.len(), data.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl ExceptionStore for FileExceptionStore {
    async fn find_exact(
        &self,
        source_text: &str,
        params: &DeclensionRequest,
    ) -> Result<Option<ExceptionEntry>> {
        self.inner.find_exact(source_text, params).await
    }

    async fn find_many(
        &self,
        source_texts: &[String],
        params: &DeclensionRequest,
    ) -> Result<HashMap<String, ExceptionEntry>> {
        self.inner.find_many(source_texts, params).await
    }

    async fn get(&self, id: u64) -> Result<Option<ExceptionEntry>> {
        self.inner.get(id).await
    }

    // Changes are applied to a staged copy and reach `inner` only after
    // the file write succeeds.

    async fn insert_unique(&self, entry: NewException) -> Result<Option<ExceptionEntry>> {
        let _guard = self.write_lock.lock().await;
        let staged = self.inner.fork().await;
        let created = staged.insert_unique(entry).await?;
        if created.is_some() {
            self.persist(&staged).await?;
            self.inner.commit(staged).await;
        }
        Ok(created)
    }

    async fn update(&self, id: u64, update: ExceptionUpdate) -> Result<Option<ExceptionEntry>> {
        let _guard = self.write_lock.lock().await;
        let staged = self.inner.fork().await;
        let updated = staged.update(id, update).await?;
        if updated.is_some() {
            self.persist(&staged).await?;
            self.inner.commit(staged).await;
        }
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let staged = self.inner.fork().await;
        let deleted = staged.delete(id).await?;
        if deleted {
            self.persist(&staged).await?;
            self.inner.commit(staged).await;
        }
        Ok(deleted)
    }

    async fn list(&self, system: Option<&str>) -> Result<Vec<ExceptionEntry>> {
        self.inner.list(system).await
    }
}
