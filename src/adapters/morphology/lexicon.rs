use crate::domain::model::GrammemeSet;
use crate::utils::error::{DeclensionError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Suffix length used to bucket known forms for prediction.
const SUFFIX_KEY_LEN: usize = 3;

/// Shorter unknown words are never predicted.
const MIN_PREDICTED_LEN: usize = 4;

#[derive(Debug, Deserialize)]
struct LexiconFile {
    paradigms: Vec<ParadigmEntry>,
    lexemes: Vec<LexemeEntry>,
}

#[derive(Debug, Deserialize)]
struct ParadigmEntry {
    name: String,
    /// `[grammemes, ending]` pairs, in preference order.
    forms: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct LexemeEntry {
    stem: String,
    paradigm: String,
    tags: String,
    #[serde(default = "default_frequency")]
    frequency: u32,
}

fn default_frequency() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct Paradigm {
    pub name: String,
    pub forms: Vec<Form>,
}

#[derive(Debug, Clone)]
pub struct Form {
    pub grammemes: GrammemeSet,
    pub ending: String,
}

#[derive(Debug, Clone)]
pub struct Lexeme {
    pub stem: String,
    pub paradigm: usize,
    pub tags: GrammemeSet,
    pub frequency: u32,
}

/// A known surface form: lexeme index and form index in its paradigm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRef {
    pub lexeme: usize,
    pub form: usize,
}

/// Paradigm tables plus the word lists that use them, indexed by surface
/// form and by the last letters of each form.
#[derive(Debug, Clone)]
pub struct Lexicon {
    paradigms: Vec<Paradigm>,
    lexemes: Vec<Lexeme>,
    by_form: HashMap<String, Vec<FormRef>>,
    by_suffix: HashMap<String, Vec<FormRef>>,
}

impl Lexicon {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeclensionError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)
            .map_err(|e| DeclensionError::lexicon(format!("TOML parsing error: {}", e)))?;

        let mut paradigm_ids = HashMap::new();
        let mut paradigms = Vec::with_capacity(file.paradigms.len());
        for entry in file.paradigms {
            if entry.forms.is_empty() {
                return Err(DeclensionError::lexicon(format!(
                    "paradigm '{}' has no forms",
                    entry.name
                )));
            }
            let forms = entry
                .forms
                .into_iter()
                .map(|(grammemes, ending)| -> Result<Form> {
                    let grammemes = GrammemeSet::parse_list(&grammemes).map_err(|e| {
                        DeclensionError::lexicon(format!("paradigm '{}': {}", entry.name, e))
                    })?;
                    Ok(Form { grammemes, ending })
                })
                .collect::<Result<Vec<_>>>()?;
            if paradigm_ids
                .insert(entry.name.clone(), paradigms.len())
                .is_some()
            {
                return Err(DeclensionError::lexicon(format!(
                    "paradigm '{}' is defined twice",
                    entry.name
                )));
            }
            paradigms.push(Paradigm {
                name: entry.name,
                forms,
            });
        }

        let lexemes = file
            .lexemes
            .into_iter()
            .map(|entry| -> Result<Lexeme> {
                let paradigm = *paradigm_ids.get(&entry.paradigm).ok_or_else(|| {
                    DeclensionError::lexicon(format!(
                        "lexeme '{}' refers to unknown paradigm '{}'",
                        entry.stem, entry.paradigm
                    ))
                })?;
                let tags = GrammemeSet::parse_list(&entry.tags).map_err(|e| {
                    DeclensionError::lexicon(format!("lexeme '{}': {}", entry.stem, e))
                })?;
                Ok(Lexeme {
                    stem: entry.stem.to_lowercase(),
                    paradigm,
                    tags,
                    frequency: entry.frequency,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut lexicon = Self {
            paradigms,
            lexemes,
            by_form: HashMap::new(),
            by_suffix: HashMap::new(),
        };
        lexicon.build_index();
        tracing::debug!(
            "Lexicon loaded: {} paradigms, {} lexemes, {} surface forms",
            lexicon.paradigms.len(),
            lexicon.lexemes.len(),
            lexicon.by_form.len()
        );
        Ok(lexicon)
    }

    /// Index lists come out ordered by lexeme frequency (stable), then by
    /// paradigm order.
    fn build_index(&mut self) {
        let mut order: Vec<usize> = (0..self.lexemes.len()).collect();
        order.sort_by(|a, b| self.lexemes[*b].frequency.cmp(&self.lexemes[*a].frequency));

        for lexeme in order {
            let form_count = self.paradigms[self.lexemes[lexeme].paradigm].forms.len();
            for form in 0..form_count {
                let form_ref = FormRef { lexeme, form };
                let surface = self.surface(form_ref);

                let chars: Vec<char> = surface.chars().collect();
                if chars.len() >= SUFFIX_KEY_LEN {
                    let key: String = chars[chars.len() - SUFFIX_KEY_LEN..].iter().collect();
                    self.by_suffix.entry(key).or_default().push(form_ref);
                }
                self.by_form.entry(surface).or_default().push(form_ref);
            }
        }
    }

    pub fn lexeme(&self, index: usize) -> Option<&Lexeme> {
        self.lexemes.get(index)
    }

    pub fn paradigm_of(&self, lexeme: &Lexeme) -> &Paradigm {
        &self.paradigms[lexeme.paradigm]
    }

    pub fn form(&self, form_ref: FormRef) -> &Form {
        let lexeme = &self.lexemes[form_ref.lexeme];
        &self.paradigms[lexeme.paradigm].forms[form_ref.form]
    }

    pub fn surface(&self, form_ref: FormRef) -> String {
        let lexeme = &self.lexemes[form_ref.lexeme];
        format!("{}{}", lexeme.stem, self.form(form_ref).ending)
    }

    /// Every known analysis of an already lowercased word.
    pub fn lookup(&self, word: &str) -> &[FormRef] {
        self.by_form.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Known forms sharing the longest common ending with `word`. The shared
    /// part must cover the form's inflectional ending and stop short of the
    /// start of `word`.
    pub fn similar_forms(&self, word: &str) -> Vec<FormRef> {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() < MIN_PREDICTED_LEN {
            return Vec::new();
        }
        let key: String = chars[chars.len() - SUFFIX_KEY_LEN..].iter().collect();
        let Some(bucket) = self.by_suffix.get(&key) else {
            return Vec::new();
        };

        let mut best = 0;
        let mut found = Vec::new();
        for &form_ref in bucket {
            let surface: Vec<char> = self.surface(form_ref).chars().collect();
            let shared = chars
                .iter()
                .rev()
                .zip(surface.iter().rev())
                .take_while(|(a, b)| a == b)
                .count();
            let ending_len = self.form(form_ref).ending.chars().count();
            if shared < ending_len || shared >= chars.len() {
                continue;
            }
            if shared > best {
                best = shared;
                found.clear();
            }
            if shared == best {
                found.push(form_ref);
            }
        }
        found
    }

    pub fn paradigm_count(&self) -> usize {
        self.paradigms.len()
    }

    pub fn lexeme_count(&self) -> usize {
        self.lexemes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Case;

    const SMALL: &str = r#"
        [[paradigms]]
        name = "hard"
        forms = [["nomn,sing", ""], ["gent,sing", "а"], ["accs,sing", "а"]]

        [[lexemes]]
        stem = "слон"
        paradigm = "hard"
        tags = "NOUN,anim,masc"

        [[lexemes]]
        stem = "Кот"
        paradigm = "hard"
        tags = "NOUN,anim,masc"
        frequency = 5
    "#;

    #[test]
    fn test_lookup_orders_by_frequency_then_paradigm() {
        let lexicon = Lexicon::from_toml_str(SMALL).unwrap();
        assert_eq!(lexicon.lexeme_count(), 2);

        let parses = lexicon.lookup("кота");
        assert_eq!(parses.len(), 2);
        assert!(lexicon.form(parses[0]).grammemes.contains(Case::Gent));
        assert!(lexicon.form(parses[1]).grammemes.contains(Case::Accs));
        assert!(lexicon.lookup("собака").is_empty());
    }

    #[test]
    fn test_similar_forms_need_three_shared_letters() {
        let lexicon = Lexicon::from_toml_str(SMALL).unwrap();
        let similar = lexicon.similar_forms("пилота");
        assert_eq!(similar.len(), 2);
        assert_eq!(lexicon.surface(similar[0]), "кота");
        assert!(lexicon.similar_forms("мак").is_empty());
    }

    #[test]
    fn test_short_words_and_whole_suffix_matches_are_not_predicted() {
        let lexicon = Lexicon::from_toml_str(SMALL).unwrap();
        assert!(lexicon.similar_forms("ота").is_empty());
        assert!(lexicon.similar_forms("лона").is_empty());
        assert_eq!(lexicon.similar_forms("лота").len(), 2);
    }

    #[test]
    fn test_unknown_paradigm_is_rejected() {
        let broken = r#"
            paradigms = []

            [[lexemes]]
            stem = "слон"
            paradigm = "missing"
            tags = "NOUN"
        "#;
        let err = Lexicon::from_toml_str(broken).unwrap_err();
        assert!(matches!(err, DeclensionError::LexiconError { .. }));
    }

    #[test]
    fn test_bad_grammeme_is_rejected() {
        let broken = r#"
            lexemes = []

            [[paradigms]]
            name = "hard"
            forms = [["nomn,bogus", ""]]
        "#;
        assert!(Lexicon::from_toml_str(broken).is_err());
    }
}
