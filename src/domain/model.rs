use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Grammatical case, serialized with the analyzer's short tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nomn,
    Gent,
    Datv,
    Accs,
    Ablt,
    Loct,
    Voct,
    Gen2,
    Acc2,
    Loc2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masc,
    Femn,
    Neut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Sing,
    Plur,
}

impl Case {
    pub const ALL: [Case; 10] = [
        Case::Nomn,
        Case::Gent,
        Case::Datv,
        Case::Accs,
        Case::Ablt,
        Case::Loct,
        Case::Voct,
        Case::Gen2,
        Case::Acc2,
        Case::Loc2,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Case::Nomn => "nomn",
            Case::Gent => "gent",
            Case::Datv => "datv",
            Case::Accs => "accs",
            Case::Ablt => "ablt",
            Case::Loct => "loct",
            Case::Voct => "voct",
            Case::Gen2 => "gen2",
            Case::Acc2 => "acc2",
            Case::Loc2 => "loc2",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Case::Nomn => "именительный",
            Case::Gent => "родительный",
            Case::Datv => "дательный",
            Case::Accs => "винительный",
            Case::Ablt => "творительный",
            Case::Loct => "предложный",
            Case::Voct => "звательный",
            Case::Gen2 => "второй родительный (частичный)",
            Case::Acc2 => "второй винительный",
            Case::Loc2 => "второй предложный (местный)",
        }
    }
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Masc, Gender::Femn, Gender::Neut];

    pub fn tag(self) -> &'static str {
        match self {
            Gender::Masc => "masc",
            Gender::Femn => "femn",
            Gender::Neut => "neut",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Gender::Masc => "мужской род",
            Gender::Femn => "женский род",
            Gender::Neut => "средний род",
        }
    }
}

impl Number {
    pub const ALL: [Number; 2] = [Number::Sing, Number::Plur];

    pub fn tag(self) -> &'static str {
        match self {
            Number::Sing => "sing",
            Number::Plur => "plur",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Number::Sing => "единственное число",
            Number::Plur => "множественное число",
        }
    }
}

macro_rules! tag_enum_text {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.tag() == s)
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = Self::ALL.iter().map(|v| v.tag()).collect();
                        format!("unknown {} '{}', expected one of: {}", $kind, s, allowed.join(", "))
                    })
            }
        }
    };
}

tag_enum_text!(Case, "case");
tag_enum_text!(Gender, "gender");
tag_enum_text!(Number, "number");

/// A single morphological feature attached to a parsed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grammeme {
    Noun,
    Adjf,
    Anim,
    Inan,
    Gender(Gender),
    Number(Number),
    Case(Case),
    Name,
    Surn,
    Patr,
    Unkn,
}

impl fmt::Display for Grammeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grammeme::Noun => f.write_str("NOUN"),
            Grammeme::Adjf => f.write_str("ADJF"),
            Grammeme::Anim => f.write_str("anim"),
            Grammeme::Inan => f.write_str("inan"),
            Grammeme::Gender(g) => g.fmt(f),
            Grammeme::Number(n) => n.fmt(f),
            Grammeme::Case(c) => c.fmt(f),
            Grammeme::Name => f.write_str("Name"),
            Grammeme::Surn => f.write_str("Surn"),
            Grammeme::Patr => f.write_str("Patr"),
            Grammeme::Unkn => f.write_str("UNKN"),
        }
    }
}

impl FromStr for Grammeme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let grammeme = match s {
            "NOUN" => Grammeme::Noun,
            "ADJF" => Grammeme::Adjf,
            "anim" => Grammeme::Anim,
            "inan" => Grammeme::Inan,
            "Name" => Grammeme::Name,
            "Surn" => Grammeme::Surn,
            "Patr" => Grammeme::Patr,
            "UNKN" => Grammeme::Unkn,
            other => {
                if let Ok(case) = other.parse::<Case>() {
                    Grammeme::Case(case)
                } else if let Ok(gender) = other.parse::<Gender>() {
                    Grammeme::Gender(gender)
                } else if let Ok(number) = other.parse::<Number>() {
                    Grammeme::Number(number)
                } else {
                    return Err(format!("unknown grammeme '{}'", other));
                }
            }
        };
        Ok(grammeme)
    }
}

impl From<Case> for Grammeme {
    fn from(case: Case) -> Self {
        Grammeme::Case(case)
    }
}

impl From<Gender> for Grammeme {
    fn from(gender: Gender) -> Self {
        Grammeme::Gender(gender)
    }
}

impl From<Number> for Grammeme {
    fn from(number: Number) -> Self {
        Grammeme::Number(number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammemeSet(BTreeSet<Grammeme>);

impl GrammemeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma separated list such as `"NOUN,anim,masc"`.
    pub fn parse_list(list: &str) -> std::result::Result<Self, String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }

    pub fn insert(&mut self, grammeme: impl Into<Grammeme>) {
        self.0.insert(grammeme.into());
    }

    pub fn contains(&self, grammeme: impl Into<Grammeme>) -> bool {
        self.0.contains(&grammeme.into())
    }

    pub fn is_superset(&self, other: &GrammemeSet) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn union(&self, other: &GrammemeSet) -> GrammemeSet {
        GrammemeSet(self.0.union(&other.0).copied().collect())
    }

    pub fn shared_with(&self, other: &GrammemeSet) -> usize {
        self.0.intersection(&other.0).count()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.0.iter().find_map(|g| match g {
            Grammeme::Gender(gender) => Some(*gender),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grammeme> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Grammeme> for GrammemeSet {
    fn from_iter<I: IntoIterator<Item = Grammeme>>(iter: I) -> Self {
        GrammemeSet(iter.into_iter().collect())
    }
}

impl fmt::Display for GrammemeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.0.iter().map(|g| g.to_string()).collect();
        f.write_str(&tags.join(","))
    }
}

fn default_number() -> Option<Number> {
    Some(Number::Sing)
}

/// Grammatical parameters shared by every inflection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclensionRequest {
    pub case: Case,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default = "default_number")]
    pub number: Option<Number>,
    #[serde(default)]
    pub system: Option<String>,
}

impl DeclensionRequest {
    pub fn new(case: Case) -> Self {
        Self {
            case,
            gender: None,
            number: default_number(),
            system: None,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_number(mut self, number: Number) -> Self {
        self.number = Some(number);
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Target grammemes for the analyzer; absent gender/number are dropped.
    pub fn target(&self) -> GrammemeSet {
        let mut target = GrammemeSet::new();
        target.insert(self.case);
        if let Some(gender) = self.gender {
            target.insert(gender);
        }
        if let Some(number) = self.number {
            target.insert(number);
        }
        target
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonNameRequest {
    pub fullname: String,
    #[serde(flatten)]
    pub params: DeclensionRequest,
}

impl PersonNameRequest {
    pub fn new(fullname: impl Into<String>, params: DeclensionRequest) -> Self {
        Self {
            fullname: fullname.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRequest {
    pub source_text: String,
    #[serde(flatten)]
    pub params: DeclensionRequest,
}

impl TextRequest {
    pub fn new(source_text: impl Into<String>, params: DeclensionRequest) -> Self {
        Self {
            source_text: source_text.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclensionResult {
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionEntry {
    pub id: u64,
    pub source_text: String,
    pub case: Case,
    pub gender: Option<Gender>,
    pub number: Option<Number>,
    pub result: String,
    pub system: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ExceptionEntry {
    /// Exact comparison of the lookup key; `None` only matches `None`.
    pub fn matches(&self, source_text: &str, params: &DeclensionRequest) -> bool {
        self.source_text == source_text && self.matches_params(params)
    }

    pub fn matches_params(&self, params: &DeclensionRequest) -> bool {
        self.case == params.case
            && self.gender == params.gender
            && self.number == params.number
            && self.system == params.system
    }
}

/// Create shape: `target_text` becomes the stored `result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewException {
    pub source_text: String,
    pub target_text: String,
    #[serde(flatten)]
    pub params: DeclensionRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionUpdate {
    pub source_text: String,
    pub result: String,
    #[serde(flatten)]
    pub params: DeclensionRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub surname: String,
    pub name: Option<String>,
    pub patronymic: Option<String>,
}

impl NameParts {
    pub fn words(&self) -> Vec<String> {
        std::iter::once(self.surname.clone())
            .chain(self.name.clone())
            .chain(self.patronymic.clone())
            .collect()
    }
}

/// One analysis of a word. `stem` and `lexeme` are the analyzer's handle
/// for re-inflecting the same lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphParse {
    pub word: String,
    pub lemma: String,
    pub tag: GrammemeSet,
    pub stem: String,
    pub lexeme: Option<usize>,
}

impl MorphParse {
    pub fn unknown(word: &str) -> Self {
        let word = word.to_lowercase();
        Self {
            lemma: word.clone(),
            stem: word.clone(),
            word,
            tag: std::iter::once(Grammeme::Unkn).collect(),
            lexeme: None,
        }
    }

    pub fn is_animate_nominative_noun(&self) -> bool {
        self.tag.contains(Grammeme::Noun)
            && self.tag.contains(Grammeme::Anim)
            && self.tag.contains(Case::Nomn)
    }
}
