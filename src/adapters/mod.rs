// Adapters layer: concrete implementations of the domain ports.

pub mod file_store;
pub mod memory_store;
pub mod morphology;

use crate::config::toml_config::{AppConfig, StorageBackend};
use crate::domain::ports::ExceptionStore;
use crate::utils::error::Result;
use std::sync::Arc;

pub use file_store::FileExceptionStore;
pub use memory_store::MemoryExceptionStore;
pub use morphology::LexiconMorphology;

/// Opens the exception store selected by the storage settings.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn ExceptionStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory exception store, changes are lost on exit");
            Ok(Arc::new(MemoryExceptionStore::new()))
        }
        StorageBackend::File => {
            let store = FileExceptionStore::open(config.exceptions_path()).await?;
            tracing::debug!("Using exception file {}", store.path().display());
            Ok(Arc::new(store))
        }
    }
}

/// Analyzer over the configured lexicon, or the embedded one.
pub fn open_morphology(config: &AppConfig) -> Result<LexiconMorphology> {
    match &config.morphology.lexicon_path {
        Some(path) => LexiconMorphology::from_file(path),
        None => LexiconMorphology::embedded(),
    }
}
