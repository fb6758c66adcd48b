//! Letter-case capture and restoration.

/// `true` marks a lowercase character.
pub type CasePattern = Vec<bool>;

pub fn capture(word: &str) -> CasePattern {
    word.chars().map(char::is_lowercase).collect()
}

pub fn apply(word: &str, pattern: &[bool]) -> String {
    word.chars()
        .enumerate()
        .flat_map(|(idx, letter)| -> Box<dyn Iterator<Item = char>> {
            match pattern.get(idx) {
                Some(true) => Box::new(letter.to_lowercase()),
                Some(false) => Box::new(letter.to_uppercase()),
                None => Box::new(std::iter::once(letter)),
            }
        })
        .collect()
}

pub fn capture_text(text: &str, sep: &str) -> Vec<CasePattern> {
    text.split(sep).map(capture).collect()
}

pub fn apply_text(text: &str, patterns: &[CasePattern], sep: &str) -> String {
    text.split(sep)
        .enumerate()
        .map(|(idx, word)| match patterns.get(idx) {
            Some(pattern) => apply(word, pattern),
            None => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

/// Reapplies the casing of `source` onto `target`, word by word.
pub fn restore_casing(source: &str, target: &str, sep: &str) -> String {
    apply_text(target, &capture_text(source, sep), sep)
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
