use crate::domain::model::{DeclensionRequest, ExceptionEntry, ExceptionUpdate, NewException};
use crate::domain::ports::ExceptionStore;
use crate::utils::error::{DeclensionError, Result};
use crate::utils::validation::{validate_non_empty_text, Validate};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Exact-match overrides plus the management operations on them.
pub struct ExceptionResolver<S: ExceptionStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ExceptionStore + ?Sized> Clone for ExceptionResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ExceptionStore + ?Sized> ExceptionResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn find_exact(
        &self,
        text: &str,
        params: &DeclensionRequest,
    ) -> Result<Option<ExceptionEntry>> {
        self.store.find_exact(text, params).await
    }

    pub async fn find_many(
        &self,
        words: &[String],
        params: &DeclensionRequest,
    ) -> Result<HashMap<String, ExceptionEntry>> {
        if words.is_empty() {
            return Ok(HashMap::new());
        }
        self.store.find_many(words, params).await
    }

    pub async fn create(&self, request: NewException) -> Result<ExceptionEntry> {
        request.validate()?;
        let source_text = request.source_text.clone();
        match self.store.insert_unique(request).await? {
            Some(entry) => {
                tracing::info!("Created exception {} for '{}'", entry.id, entry.source_text);
                Ok(entry)
            }
            None => Err(DeclensionError::Conflict { source_text }),
        }
    }

    pub async fn get(&self, id: u64) -> Result<ExceptionEntry> {
        self.store
            .get(id)
            .await?
            .ok_or(DeclensionError::NotFound { id })
    }

    pub async fn update(&self, id: u64, update: ExceptionUpdate) -> Result<ExceptionEntry> {
        update.validate()?;
        let entry = self
            .store
            .update(id, update)
            .await?
            .ok_or(DeclensionError::NotFound { id })?;
        tracing::info!("Updated exception {}", id);
        Ok(entry)
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(DeclensionError::NotFound { id });
        }
        tracing::info!("Deleted exception {}", id);
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<ExceptionEntry>> {
        self.store.list(None).await
    }

    pub async fn list_by_system(&self, system: &str) -> Result<Vec<ExceptionEntry>> {
        self.store.list(Some(system)).await
    }

    /// Distinct, non-empty system tags in sorted order.
    pub async fn list_systems(&self) -> Result<Vec<String>> {
        let systems: BTreeSet<String> = self
            .store
            .list(None)
            .await?
            .into_iter()
            .filter_map(|entry| entry.system)
            .collect();
        Ok(systems.into_iter().collect())
    }
}

impl Validate for NewException {
    fn validate(&self) -> Result<()> {
        validate_non_empty_text("source_text", &self.source_text)?;
        validate_non_empty_text("target_text", &self.target_text)
    }
}

impl Validate for ExceptionUpdate {
    fn validate(&self) -> Result<()> {
        validate_non_empty_text("source_text", &self.source_text)?;
        validate_non_empty_text("result", &self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::MemoryExceptionStore;
    use crate::domain::model::{Case, Gender};

    fn resolver() -> ExceptionResolver<MemoryExceptionStore> {
        ExceptionResolver::new(Arc::new(MemoryExceptionStore::new()))
    }

    fn new_exception(system: Option<&str>) -> NewException {
        let mut params = DeclensionRequest::new(Case::Gent).with_gender(Gender::Masc);
        params.system = system.map(str::to_string);
        NewException {
            source_text: "Мерзлячкин Арбуз Арбузович".to_string(),
            target_text: "Мерзлячкину Арбуз Арбузовичу".to_string(),
            params,
        }
    }

    #[test]
    fn test_duplicate_create_conflicts() {
        tokio_test::block_on(async {
            let resolver = resolver();
            resolver.create(new_exception(Some("Тест"))).await.unwrap();
            let err = resolver.create(new_exception(Some("Тест"))).await.unwrap_err();
            assert!(matches!(err, DeclensionError::Conflict { .. }));

            // a different scope is a different key
            assert!(resolver.create(new_exception(None)).await.is_ok());
        });
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        tokio_test::block_on(async {
            let resolver = resolver();
            assert!(matches!(resolver.get(42).await, Err(DeclensionError::NotFound { id: 42 })));
            assert!(matches!(resolver.delete(42).await, Err(DeclensionError::NotFound { .. })));

            let update = ExceptionUpdate {
                source_text: "Орех".to_string(),
                result: "Ореха".to_string(),
                params: DeclensionRequest::new(Case::Gent),
            };
            assert!(matches!(
                resolver.update(42, update).await,
                Err(DeclensionError::NotFound { .. })
            ));
        });
    }

    #[test]
    fn test_empty_target_text_is_rejected() {
        tokio_test::block_on(async {
            let resolver = resolver();
            let mut request = new_exception(None);
            request.target_text = " ".to_string();
            assert!(matches!(
                resolver.create(request).await,
                Err(DeclensionError::ValidationError { .. })
            ));
        });
    }

    #[test]
    fn test_lookup_is_exact_on_unspecified_gender() {
        tokio_test::block_on(async {
            let resolver = resolver();
            resolver.create(new_exception(Some("Тест"))).await.unwrap();

            let with_gender = DeclensionRequest::new(Case::Gent)
                .with_gender(Gender::Masc)
                .with_system("Тест");
            let without_gender = DeclensionRequest::new(Case::Gent).with_system("Тест");

            let text = "Мерзлячкин Арбуз Арбузович";
            assert!(resolver.find_exact(text, &with_gender).await.unwrap().is_some());
            assert!(resolver.find_exact(text, &without_gender).await.unwrap().is_none());
        });
    }

    #[test]
    fn test_list_systems() {
        tokio_test::block_on(async {
            let resolver = resolver();
            resolver.create(new_exception(Some("ГКУ"))).await.unwrap();
            resolver.create(new_exception(Some("Тест"))).await.unwrap();
            resolver.create(new_exception(None)).await.unwrap();

            assert_eq!(resolver.list_systems().await.unwrap(), vec!["ГКУ", "Тест"]);
            assert_eq!(resolver.list_by_system("ГКУ").await.unwrap().len(), 1);
            assert_eq!(resolver.list_all().await.unwrap().len(), 3);
        });
    }
}
