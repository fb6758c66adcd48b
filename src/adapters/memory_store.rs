use crate::domain::model::{DeclensionRequest, ExceptionEntry, ExceptionUpdate, NewException};
use crate::domain::ports::ExceptionStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct StoreState {
    entries: Vec<ExceptionEntry>,
    next_id: u64,
}

#[derive(Debug)]
pub struct MemoryExceptionStore {
    state: RwLock<StoreState>,
}

impl Default for MemoryExceptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryExceptionStore {
    pub fn new() -> Self {
        Self::from_entries(Vec::new())
    }

    pub fn from_entries(entries: Vec<ExceptionEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            state: RwLock::new(StoreState { entries, next_id }),
        }
    }

    pub async fn snapshot(&self) -> Vec<ExceptionEntry> {
        self.state.read().await.entries.clone()
    }

    /// Independent copy, id counter included, for staging a change.
    pub async fn fork(&self) -> Self {
        let state = self.state.read().await;
        Self {
            state: RwLock::new(StoreState {
                entries: state.entries.clone(),
                next_id: state.next_id,
            }),
        }
    }

    /// Replaces this table with a staged copy.
    pub async fn commit(&self, staged: Self) {
        *self.state.write().await = staged.state.into_inner();
    }
}

#[async_trait]
impl ExceptionStore for MemoryExceptionStore {
    async fn find_exact(
        &self,
        source_text: &str,
        params: &DeclensionRequest,
    ) -> Result<Option<ExceptionEntry>> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .iter()
            .find(|e| e.matches(source_text, params))
            .cloned())
    }

    async fn find_many(
        &self,
        source_texts: &[String],
        params: &DeclensionRequest,
    ) -> Result<HashMap<String, ExceptionEntry>> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .iter()
            .filter(|e| e.matches_params(params) && source_texts.contains(&e.source_text))
            .map(|e| (e.source_text.clone(), e.clone()))
            .collect())
    }

    async fn get(&self, id: u64) -> Result<Option<ExceptionEntry>> {
        let state = self.state.read().await;
        Ok(state.entries.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_unique(&self, entry: NewException) -> Result<Option<ExceptionEntry>> {
        let mut state = self.state.write().await;
        if state
            .entries
            .iter()
            .any(|e| e.matches(&entry.source_text, &entry.params))
        {
            return Ok(None);
        }

        let created = ExceptionEntry {
            id: state.next_id,
            source_text: entry.source_text,
            case: entry.params.case,
            gender: entry.params.gender,
            number: entry.params.number,
            result: entry.target_text,
            system: entry.params.system,
            created_at: Utc::now(),
        };
        state.next_id += 1;
        state.entries.push(created.clone());
        Ok(Some(created))
    }

    async fn update(&self, id: u64, update: ExceptionUpdate) -> Result<Option<ExceptionEntry>> {
        let mut state = self.state.write().await;
        let Some(entry) = state.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        entry.source_text = update.source_text;
        entry.result = update.result;
        entry.case = update.params.case;
        entry.gender = update.params.gender;
        entry.number = update.params.number;
        entry.system = update.params.system;
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.entries.len();
        state.entries.retain(|e| e.id != id);
        Ok(state.entries.len() != before)
    }

    async fn list(&self, system: Option<&str>) -> Result<Vec<ExceptionEntry>> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .iter()
            .filter(|e| system.is_none() || e.system.as_deref() == system)
            .cloned()
            .collect())
    }
}
