//! Dictionary-driven morphology: a TOML lexicon of paradigms, an ending
//! predictor for words the lexicon does not list, and a Snowball stemmer.

pub mod lexicon;
pub mod stemmer;

pub use lexicon::{FormRef, Lexicon};
pub use stemmer::SnowballStemmer;

use crate::domain::model::{GrammemeSet, MorphParse};
use crate::domain::ports::{InflectionFailure, MorphologyPort};
use crate::utils::error::Result;
use std::path::Path;

const EMBEDDED_LEXICON: &str = include_str!("../../../data/lexicon.toml");

#[derive(Debug, Clone)]
pub struct LexiconMorphology {
    lexicon: Lexicon,
    stemmer: SnowballStemmer,
}

impl LexiconMorphology {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            stemmer: SnowballStemmer::new(),
        }
    }

    /// Analyzer over the lexicon compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(Lexicon::from_toml_str(EMBEDDED_LEXICON)?))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::info!("📖 Loading lexicon from {}", path.as_ref().display());
        Ok(Self::new(Lexicon::from_file(path)?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn build_parse(&self, word: &str, stem: &str, form_ref: FormRef) -> Option<MorphParse> {
        let lexeme = self.lexicon.lexeme(form_ref.lexeme)?;
        let paradigm = self.lexicon.paradigm_of(lexeme);
        let lemma_ending = paradigm.forms.first().map_or("", |f| f.ending.as_str());
        let form = self.lexicon.form(form_ref);

        Some(MorphParse {
            word: word.to_string(),
            lemma: format!("{}{}", stem, lemma_ending),
            tag: lexeme.tags.union(&form.grammemes),
            stem: stem.to_string(),
            lexeme: Some(form_ref.lexeme),
        })
    }

    fn known_parses(&self, word: &str) -> Vec<MorphParse> {
        self.lexicon
            .lookup(word)
            .iter()
            .filter_map(|&form_ref| {
                let stem = self.lexicon.lexeme(form_ref.lexeme)?.stem.clone();
                self.build_parse(word, &stem, form_ref)
            })
            .collect()
    }

    /// Borrows the paradigm of the known forms with the longest shared
    /// ending. Lexemes that share paradigm and tags give one parse.
    fn predicted_parses(&self, word: &str) -> Vec<MorphParse> {
        if !is_predictable(word) {
            return Vec::new();
        }

        let mut seen: Vec<(usize, usize, &GrammemeSet)> = Vec::new();
        let mut parses = Vec::new();
        for form_ref in self.lexicon.similar_forms(word) {
            let Some(lexeme) = self.lexicon.lexeme(form_ref.lexeme) else {
                continue;
            };
            let key = (lexeme.paradigm, form_ref.form, &lexeme.tags);
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);

            let ending_len = self.lexicon.form(form_ref).ending.chars().count();
            let keep = word.chars().count() - ending_len;
            let stem: String = word.chars().take(keep).collect();
            parses.extend(self.build_parse(word, &stem, form_ref));
        }
        parses
    }
}

/// Cyrillic letters and hyphens only, with at least one letter.
fn is_predictable(word: &str) -> bool {
    word.chars().any(|c| c != '-')
        && word
            .chars()
            .all(|c| matches!(c, 'а'..='я' | 'ё' | '-'))
}

impl MorphologyPort for LexiconMorphology {
    fn parse_candidates(&self, word: &str) -> Vec<MorphParse> {
        let lowered = word.to_lowercase();

        let known = self.known_parses(&lowered);
        if !known.is_empty() {
            return known;
        }

        let predicted = self.predicted_parses(&lowered);
        if !predicted.is_empty() {
            tracing::trace!("Predicted {} parses for '{}'", predicted.len(), lowered);
            return predicted;
        }

        vec![MorphParse::unknown(&lowered)]
    }

    /// Among the lexeme's forms carrying every target grammeme, picks the
    /// one closest to the current parse; ties go to paradigm order.
    fn inflect(
        &self,
        parse: &MorphParse,
        target: &GrammemeSet,
    ) -> std::result::Result<String, InflectionFailure> {
        let fail = || InflectionFailure::new(&parse.word, target);
        let lexeme = parse
            .lexeme
            .and_then(|index| self.lexicon.lexeme(index))
            .ok_or_else(fail)?;

        let mut best: Option<(usize, &str)> = None;
        for form in &self.lexicon.paradigm_of(lexeme).forms {
            let grammemes = lexeme.tags.union(&form.grammemes);
            if !grammemes.is_superset(target) {
                continue;
            }
            let score = grammemes.shared_with(&parse.tag);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, form.ending.as_str()));
            }
        }

        best.map(|(_, ending)| format!("{}{}", parse.stem, ending))
            .ok_or_else(fail)
    }

    fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Case, Gender, Grammeme, Number};

    fn morph() -> LexiconMorphology {
        LexiconMorphology::embedded().unwrap()
    }

    fn target(case: Case, gender: Option<Gender>, number: Number) -> GrammemeSet {
        let mut target = GrammemeSet::new();
        target.insert(case);
        target.insert(number);
        if let Some(gender) = gender {
            target.insert(gender);
        }
        target
    }

    #[test]
    fn test_embedded_lexicon_loads() {
        let morph = morph();
        assert!(morph.lexicon().lexeme_count() > 150);
        assert!(morph.lexicon().paradigm_count() > 5);
    }

    #[test]
    fn test_known_word_parses_in_paradigm_order() {
        let parses = morph().parse_candidates("Ивана");
        assert!(parses[0].tag.contains(Case::Gent));
        assert!(parses[1].tag.contains(Case::Accs));
        assert_eq!(parses[0].lemma, "иван");
        assert_eq!(parses[0].word, "ивана");
    }

    #[test]
    fn test_inflects_known_words() {
        let morph = morph();
        let gent = target(Case::Gent, None, Number::Sing);
        assert_eq!(morph.inflect_word("Иван", &gent, true).unwrap(), "ивана");
        assert_eq!(morph.inflect_word("юрий", &gent, true).unwrap(), "юрия");
        assert_eq!(morph.inflect_word("август", &gent, false).unwrap(), "августа");

        let datv = target(Case::Datv, Some(Gender::Femn), Number::Sing);
        assert_eq!(morph.inflect_word("Ольга", &datv, true).unwrap(), "ольге");
        assert_eq!(morph.inflect_word("Мария", &datv, true).unwrap(), "марии");
    }

    #[test]
    fn test_names_with_alternating_stems() {
        let morph = morph();
        let gent = target(Case::Gent, Some(Gender::Masc), Number::Sing);
        assert_eq!(morph.inflect_word("Пётр", &gent, true).unwrap(), "петра");
        assert_eq!(morph.inflect_word("Лев", &gent, true).unwrap(), "льва");

        let ablt = target(Case::Ablt, Some(Gender::Masc), Number::Sing);
        assert_eq!(morph.inflect_word("Павел", &ablt, true).unwrap(), "павлом");
        assert_eq!(morph.pick_parse("Николай", false).tag.gender(), Some(Gender::Masc));
    }

    #[test]
    fn test_template_words() {
        let morph = morph();
        let ablt = target(Case::Ablt, Some(Gender::Masc), Number::Sing);
        assert_eq!(morph.inflect_word("Филиппов", &ablt, true).unwrap(), "филипповым");

        let gent = target(Case::Gent, Some(Gender::Femn), Number::Sing);
        assert_eq!(morph.inflect_word("Тополиная", &gent, true).unwrap(), "тополиной");

        let no_gender = target(Case::Gent, None, Number::Sing);
        assert_eq!(morph.inflect_word("Тополиная", &no_gender, true).unwrap(), "тополиной");
    }

    #[test]
    fn test_animacy_prefers_nominative_person() {
        let morph = morph();
        let first = morph.pick_parse("влада", false);
        assert_eq!(first.tag.gender(), Some(Gender::Masc));

        let animate = morph.pick_parse("влада", true);
        assert!(animate.tag.contains(Case::Nomn));
        assert_eq!(animate.tag.gender(), Some(Gender::Femn));
    }

    #[test]
    fn test_predicts_unknown_words_by_ending() {
        let morph = morph();
        let parses = morph.parse_candidates("Сидорова");
        let nominative = parses.iter().find(|p| p.is_animate_nominative_noun()).unwrap();
        assert_eq!(nominative.tag.gender(), Some(Gender::Femn));
        assert_eq!(nominative.stem, "сидоров");

        let datv = target(Case::Datv, Some(Gender::Femn), Number::Sing);
        assert_eq!(morph.inflect_word("Сидорова", &datv, true).unwrap(), "сидоровой");

        let datv_plur = target(Case::Datv, None, Number::Plur);
        assert_eq!(
            morph.inflect_word("торгово-промышленный", &datv_plur, false).unwrap(),
            "торгово-промышленным"
        );
    }

    #[test]
    fn test_unpredictable_words_are_unknown() {
        let morph = morph();
        for word in ["ООО", "2021", "Мерзлячкин", "-", "дом", "сом"] {
            let parses = morph.parse_candidates(word);
            assert_eq!(parses.len(), 1, "{}", word);
            assert!(parses[0].tag.contains(Grammeme::Unkn), "{}", word);
        }

        let gent = target(Case::Gent, None, Number::Sing);
        let err = morph.inflect_word("ООО", &gent, false).unwrap_err();
        assert_eq!(err.word, "ооо");
    }

    #[test]
    fn test_short_unknown_words_are_not_reinflected() {
        let morph = morph();
        let gent = target(Case::Gent, None, Number::Sing);
        assert!(morph.inflect_word("дом", &gent, false).is_err());
        assert_eq!(morph.inflect_or_keep("дом", &gent, false), "дом");
    }

    #[test]
    fn test_impossible_target_fails() {
        let morph = morph();
        let femn = target(Case::Gent, Some(Gender::Femn), Number::Sing);
        assert!(morph.inflect_word("Иван", &femn, true).is_err());
    }

    #[test]
    fn test_stem_uses_snowball() {
        assert_eq!(morph().stem("Филиппову"), "филиппов");
    }
}
