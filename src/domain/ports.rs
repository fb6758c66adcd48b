use crate::domain::model::{
    DeclensionRequest, ExceptionEntry, ExceptionUpdate, GrammemeSet, MorphParse, NewException,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// The analyzer has no form of the word for the requested grammemes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot inflect '{word}' to {target}")]
pub struct InflectionFailure {
    pub word: String,
    pub target: String,
}

impl InflectionFailure {
    pub fn new(word: &str, target: &GrammemeSet) -> Self {
        Self {
            word: word.to_string(),
            target: target.to_string(),
        }
    }
}

/// Morphological analyzer and stemmer. Implementations are immutable after
/// construction and shared across requests.
pub trait MorphologyPort: Send + Sync {
    /// Parses of `word`, most likely first. Never empty.
    fn parse_candidates(&self, word: &str) -> Vec<MorphParse>;

    fn inflect(
        &self,
        parse: &MorphParse,
        target: &GrammemeSet,
    ) -> std::result::Result<String, InflectionFailure>;

    fn stem(&self, word: &str) -> String;

    fn pick_animate_nominative_noun<'a>(&self, candidates: &'a [MorphParse]) -> Option<&'a MorphParse> {
        candidates
            .iter()
            .find(|p| p.is_animate_nominative_noun())
            .or_else(|| candidates.first())
    }

    fn pick_parse(&self, word: &str, animacy: bool) -> MorphParse {
        let candidates = self.parse_candidates(word);
        let picked = if animacy {
            self.pick_animate_nominative_noun(&candidates)
        } else {
            candidates.first()
        };
        picked
            .cloned()
            .unwrap_or_else(|| MorphParse::unknown(word))
    }

    /// Inflects the preferred parse of `word`, surfacing the failure.
    fn inflect_word(
        &self,
        word: &str,
        target: &GrammemeSet,
        animacy: bool,
    ) -> std::result::Result<String, InflectionFailure> {
        let parse = self.pick_parse(word, animacy);
        self.inflect(&parse, target)
    }

    /// Inflects the preferred parse of `word`, keeping the parsed word when
    /// the analyzer has no matching form.
    fn inflect_or_keep(&self, word: &str, target: &GrammemeSet, animacy: bool) -> String {
        let parse = self.pick_parse(word, animacy);
        match self.inflect(&parse, target) {
            Ok(inflected) => inflected,
            Err(e) => {
                tracing::debug!("{}, keeping '{}'", e, parse.word);
                parse.word
            }
        }
    }
}

/// Persistence of exception entries.
#[async_trait]
pub trait ExceptionStore: Send + Sync {
    async fn find_exact(
        &self,
        source_text: &str,
        params: &DeclensionRequest,
    ) -> Result<Option<ExceptionEntry>>;

    async fn find_many(
        &self,
        source_texts: &[String],
        params: &DeclensionRequest,
    ) -> Result<HashMap<String, ExceptionEntry>>;

    async fn get(&self, id: u64) -> Result<Option<ExceptionEntry>>;

    /// Inserts unless an entry with the same key exists; `Ok(None)` on conflict.
    async fn insert_unique(&self, entry: NewException) -> Result<Option<ExceptionEntry>>;

    async fn update(&self, id: u64, update: ExceptionUpdate) -> Result<Option<ExceptionEntry>>;

    async fn delete(&self, id: u64) -> Result<bool>;

    async fn list(&self, system: Option<&str>) -> Result<Vec<ExceptionEntry>>;
}
