use crate::core::casing::{capitalize, restore_casing};
use crate::core::exceptions::ExceptionResolver;
use crate::core::names::{infer_gender, split};
use crate::core::surname::{inflect_surname, SurnameContext};
use crate::domain::model::{
    DeclensionRequest, DeclensionResult, ExceptionEntry, Gender, GrammemeSet, PersonNameRequest,
    TextRequest,
};
use crate::domain::ports::{ExceptionStore, MorphologyPort};
use crate::utils::error::{DeclensionError, Result};
use crate::utils::validation::{validate_non_empty_text, Validate};
use std::collections::HashMap;
use std::sync::Arc;

/// Common surnames whose inflected endings are borrowed by the surname rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNames {
    pub male: String,
    pub female: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        Self {
            male: "Филиппов".to_string(),
            female: "Тополиная".to_string(),
        }
    }
}

impl TemplateNames {
    pub fn for_gender(&self, gender: Option<Gender>) -> &str {
        if gender == Some(Gender::Masc) {
            &self.male
        } else {
            &self.female
        }
    }
}

pub struct DeclensionEngine<S: ExceptionStore + ?Sized, M: MorphologyPort> {
    exceptions: ExceptionResolver<S>,
    morph: Arc<M>,
    templates: TemplateNames,
}

impl<S: ExceptionStore + ?Sized, M: MorphologyPort> DeclensionEngine<S, M> {
    pub fn new(exceptions: ExceptionResolver<S>, morph: Arc<M>, templates: TemplateNames) -> Self {
        Self {
            exceptions,
            morph,
            templates,
        }
    }

    pub fn exceptions(&self) -> &ExceptionResolver<S> {
        &self.exceptions
    }

    pub async fn inflect_person_name(&self, request: &PersonNameRequest) -> Result<DeclensionResult> {
        request.validate()?;

        if let Some(entry) = self
            .exceptions
            .find_exact(&request.fullname, &request.params)
            .await?
        {
            tracing::debug!("Exception {} matched '{}'", entry.id, request.fullname);
            return Ok(DeclensionResult { result: entry.result });
        }

        let parts = split(&request.fullname)
            .ok_or_else(|| DeclensionError::validation("fullname", "Full name has no words"))?;

        let mut params = request.params.clone();
        if params.gender.is_none() {
            params.gender = infer_gender(
                self.morph.as_ref(),
                parts.patronymic.as_deref(),
                parts.name.as_deref(),
            );
            tracing::debug!("Inferred gender {:?} for '{}'", params.gender, request.fullname);
        }
        let target = params.target();

        let exceptions = self.exceptions.find_many(&parts.words(), &params).await?;

        let words = match parts.name.as_deref() {
            Some(name) => {
                let name = self.resolve_word(name, &exceptions, &target);
                let surname = match exceptions.get(&parts.surname) {
                    Some(entry) => entry.result.clone(),
                    None => self.inflect_surname(&parts.surname, params.gender, &target),
                };
                let mut words = vec![surname, name];
                if let Some(patronymic) = parts.patronymic.as_deref() {
                    words.push(self.resolve_word(patronymic, &exceptions, &target));
                }
                words
            }
            None => vec![self.morph.inflect_or_keep(&parts.surname, &target, true)],
        };

        let result = words
            .iter()
            .map(|word| capitalize(word))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(DeclensionResult { result })
    }

    pub async fn inflect_text(&self, request: &TextRequest) -> Result<DeclensionResult> {
        request.validate()?;

        if let Some(entry) = self
            .exceptions
            .find_exact(&request.source_text, &request.params)
            .await?
        {
            tracing::debug!("Exception {} matched '{}'", entry.id, request.source_text);
            return Ok(DeclensionResult { result: entry.result });
        }

        let words: Vec<String> = request
            .source_text
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let exceptions = self.exceptions.find_many(&words, &request.params).await?;
        let target = request.params.target();

        let inflected: Vec<String> = words
            .iter()
            .map(|word| match exceptions.get(word) {
                Some(entry) => entry.result.clone(),
                None => self.morph.inflect_or_keep(word, &target, false),
            })
            .collect();

        Ok(DeclensionResult {
            result: restore_casing(&request.source_text, &inflected.join(" "), " "),
        })
    }

    fn resolve_word(
        &self,
        word: &str,
        exceptions: &HashMap<String, ExceptionEntry>,
        target: &GrammemeSet,
    ) -> String {
        match exceptions.get(word) {
            Some(entry) => entry.result.clone(),
            None => self.morph.inflect_or_keep(word, target, true),
        }
    }

    fn inflect_surname(&self, surname: &str, gender: Option<Gender>, target: &GrammemeSet) -> String {
        let template_word = self
            .morph
            .inflect_or_keep(self.templates.for_gender(gender), target, true);
        let ctx = SurnameContext::new(self.morph.as_ref(), surname, gender, &template_word, target);
        inflect_surname(&ctx)
    }
}

impl Validate for PersonNameRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_text("fullname", &self.fullname)
    }
}

impl Validate for TextRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_text("source_text", &self.source_text)
    }
}

impl DeclensionRequest {
    /// Person-name view of these parameters.
    pub fn for_person(self, fullname: impl Into<String>) -> PersonNameRequest {
        PersonNameRequest::new(fullname, self)
    }

    /// Free-text view of these parameters.
    pub fn for_text(self, source_text: impl Into<String>) -> TextRequest {
        TextRequest::new(source_text, self)
    }
}
