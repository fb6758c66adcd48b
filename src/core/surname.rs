//! Surname inflection by analogy with a template word.
//!
//! The template word (a common surname of the requested gender) is inflected
//! by the analyzer; whatever the stemmer strips from it is the ending the
//! surname receives. Rules are tried top to bottom and the first match wins.

use crate::domain::model::{Gender, GrammemeSet};
use crate::domain::ports::MorphologyPort;

const VOWEL_ENDINGS: [char; 9] = ['у', 'е', 'ы', 'э', 'я', 'и', 'ю', 'ь', 'о'];
const POSSESSIVE_SUFFIXES: [&str; 4] = ["ов", "ев", "ева", "ина"];

pub struct SurnameContext<'a> {
    pub surname: &'a str,
    pub gender: Option<Gender>,
    /// Ending taken from the inflected template word.
    pub ending: String,
    /// The analyzer's own inflection of the surname, if it has one.
    pub direct: Option<String>,
    pub morph: &'a dyn MorphologyPort,
}

impl<'a> SurnameContext<'a> {
    pub fn new(
        morph: &'a dyn MorphologyPort,
        surname: &'a str,
        gender: Option<Gender>,
        template_word: &str,
        target: &GrammemeSet,
    ) -> Self {
        let direct = match morph.inflect_word(surname, target, true) {
            Ok(inflected) => Some(inflected),
            Err(e) => {
                tracing::debug!("no direct inflection for surname: {}", e);
                None
            }
        };
        Self {
            surname,
            gender,
            ending: template_ending(morph, template_word),
            direct,
            morph,
        }
    }
}

pub struct SurnameRule {
    pub name: &'static str,
    pub applies: fn(&SurnameContext<'_>) -> bool,
    pub apply: fn(&SurnameContext<'_>) -> String,
}

pub const SURNAME_RULES: &[SurnameRule] = &[
    SurnameRule {
        name: "possessive",
        applies: |ctx| POSSESSIVE_SUFFIXES.iter().any(|s| ctx.surname.ends_with(s)),
        apply: |ctx| {
            if ctx.gender == Some(Gender::Masc) {
                format!("{}{}", ctx.surname, ctx.ending)
            } else {
                format!("{}{}", drop_last(ctx.surname, 1), ctx.ending)
            }
        },
    },
    SurnameRule {
        name: "adjectival_feminine",
        applies: |ctx| ctx.surname.ends_with("ая"),
        apply: |ctx| format!("{}{}", drop_last(ctx.surname, 2), ctx.ending),
    },
    SurnameRule {
        name: "ora_direct",
        applies: |ctx| ctx.surname.ends_with("ора") && ctx.direct.is_some(),
        apply: |ctx| ctx.direct.clone().unwrap_or_default(),
    },
    SurnameRule {
        name: "indeclinable",
        applies: |ctx| {
            ctx.surname
                .chars()
                .last()
                .is_some_and(|c| VOWEL_ENDINGS.contains(&c))
        },
        apply: |ctx| ctx.surname.to_lowercase(),
    },
    SurnameRule {
        name: "direct",
        applies: |ctx| ctx.direct.is_some(),
        apply: |ctx| ctx.direct.clone().unwrap_or_default(),
    },
    SurnameRule {
        name: "stem_and_ending",
        applies: |_| true,
        apply: |ctx| format!("{}{}", ctx.morph.stem(ctx.surname), ctx.ending),
    },
];

/// The part of `template_word` the stemmer removes.
pub fn template_ending(morph: &dyn MorphologyPort, template_word: &str) -> String {
    let stem_len = morph.stem(template_word).chars().count();
    template_word.chars().skip(stem_len).collect()
}

pub fn inflect_surname(ctx: &SurnameContext<'_>) -> String {
    for rule in SURNAME_RULES {
        if (rule.applies)(ctx) {
            tracing::debug!("surname '{}' handled by rule '{}'", ctx.surname, rule.name);
            return (rule.apply)(ctx);
        }
    }
    ctx.surname.to_string()
}

fn drop_last(word: &str, count: usize) -> String {
    let len = word.chars().count();
    word.chars().take(len.saturating_sub(count)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MorphParse;
    use crate::domain::ports::InflectionFailure;

    /// Stems from a fixed table and inflects only
    /// words listed in `known`.
    struct StubMorph {
        known: Vec<(&'static str, &'static str)>,
    }

    impl MorphologyPort for StubMorph {
        fn parse_candidates(&self, word: &str) -> Vec<MorphParse> {
            vec![MorphParse::unknown(word)]
        }

        fn inflect(
            &self,
            parse: &MorphParse,
            target: &GrammemeSet,
        ) -> Result<String, InflectionFailure> {
            self.known
                .iter()
                .find(|(from, _)| *from == parse.word)
                .map(|(_, to)| to.to_string())
                .ok_or_else(|| InflectionFailure::new(&parse.word, target))
        }

        fn stem(&self, word: &str) -> String {
            let lower = word.to_lowercase();
            match lower.as_str() {
                "филипповым" => "филиппов".to_string(),
                "тополиной" => "тополин".to_string(),
                other => other.to_string(),
            }
        }
    }

    fn context<'a>(
        morph: &'a StubMorph,
        surname: &'a str,
        gender: Gender,
        ending: &str,
    ) -> SurnameContext<'a> {
        let direct = morph.inflect_word(surname, &GrammemeSet::new(), true).ok();
        SurnameContext {
            surname,
            gender: Some(gender),
            ending: ending.to_string(),
            direct,
            morph,
        }
    }

    fn rule_for(ctx: &SurnameContext<'_>) -> &'static str {
        SURNAME_RULES
            .iter()
            .find(|r| (r.applies)(ctx))
            .map(|r| r.name)
            .unwrap()
    }

    #[test]
    fn test_template_ending() {
        let morph = StubMorph { known: vec![] };
        assert_eq!(template_ending(&morph, "филипповым"), "ым");
        assert_eq!(template_ending(&morph, "тополиной"), "ой");
    }

    #[test]
    fn test_masculine_possessive() {
        let morph = StubMorph { known: vec![] };
        let ctx = context(&morph, "Филиппов", Gender::Masc, "ым");
        assert_eq!(rule_for(&ctx), "possessive");
        assert_eq!(inflect_surname(&ctx), "Филипповым");
    }

    #[test]
    fn test_feminine_possessive_replaces_last_letter() {
        let morph = StubMorph { known: vec![] };
        let ctx = context(&morph, "Злобина", Gender::Femn, "ой");
        assert_eq!(inflect_surname(&ctx), "Злобиной");
    }

    #[test]
    fn test_adjectival_feminine() {
        let morph = StubMorph { known: vec![] };
        let ctx = context(&morph, "Хашковская", Gender::Femn, "ой");
        assert_eq!(rule_for(&ctx), "adjectival_feminine");
        assert_eq!(inflect_surname(&ctx), "Хашковской");
    }

    #[test]
    fn test_ora_needs_direct_inflection() {
        let morph = StubMorph {
            known: vec![("гамора", "гаморы")],
        };
        let ctx = context(&morph, "Гамора", Gender::Femn, "ой");
        assert_eq!(rule_for(&ctx), "ora_direct");
        assert_eq!(inflect_surname(&ctx), "гаморы");

        let unknown = StubMorph { known: vec![] };
        let ctx = context(&unknown, "Сикора", Gender::Femn, "ой");
        assert_eq!(rule_for(&ctx), "stem_and_ending");
        assert_eq!(inflect_surname(&ctx), "сикораой");
    }

    #[test]
    fn test_vowel_endings_are_only_lowercased() {
        let morph = StubMorph {
            known: vec![("фещенко", "фещенка"), ("шишь", "шиши")],
        };
        for surname in ["Фещенко", "Шишь", "Гюго", "Ладу", "Руссо"] {
            let ctx = context(&morph, surname, Gender::Masc, "а");
            assert_eq!(rule_for(&ctx), "indeclinable", "{}", surname);
            assert_eq!(inflect_surname(&ctx), surname.to_lowercase());
        }
    }

    #[test]
    fn test_direct_then_fallback() {
        let morph = StubMorph {
            known: vec![("полишевский", "полишевского")],
        };
        let ctx = context(&morph, "Полишевский", Gender::Masc, "а");
        assert_eq!(rule_for(&ctx), "direct");
        assert_eq!(inflect_surname(&ctx), "полишевского");

        let ctx = context(&morph, "Шкитин", Gender::Masc, "а");
        assert_eq!(rule_for(&ctx), "stem_and_ending");
        assert_eq!(inflect_surname(&ctx), "шкитина");
    }
}
