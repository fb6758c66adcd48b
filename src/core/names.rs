use crate::domain::model::{Gender, NameParts};
use crate::domain::ports::MorphologyPort;

/// Feminine first names whose most likely parse is a masculine genitive.
const FEMININE_NAME_EXCEPTIONS: &[&str] =
    &["влада", "александра", "валентина", "валерия", "евгения"];

const FEMININE_PATRONYMIC_SUFFIX: &str = "на";

/// Splits a full name into surname, name and patronymic by word count.
/// Returns `None` for a blank string.
pub fn split(fullname: &str) -> Option<NameParts> {
    let mut words = fullname.split_whitespace().map(str::to_string);
    let surname = words.next()?;
    Some(NameParts {
        surname,
        name: words.next(),
        patronymic: words.next(),
    })
}

pub fn gender_by_patronymic(patronymic: &str) -> Gender {
    if patronymic.ends_with(FEMININE_PATRONYMIC_SUFFIX) {
        Gender::Femn
    } else {
        Gender::Masc
    }
}

pub fn gender_by_name<M: MorphologyPort + ?Sized>(morph: &M, name: &str) -> Option<Gender> {
    let parse = morph.pick_parse(name, false);
    if FEMININE_NAME_EXCEPTIONS.contains(&parse.word.to_lowercase().as_str()) {
        return Some(Gender::Femn);
    }
    parse.tag.gender()
}

/// Patronymic first, then the first name. Falls back to feminine when
/// neither is present.
pub fn infer_gender<M: MorphologyPort + ?Sized>(
    morph: &M,
    patronymic: Option<&str>,
    name: Option<&str>,
) -> Option<Gender> {
    if let Some(patronymic) = patronymic {
        Some(gender_by_patronymic(patronymic))
    } else if let Some(name) = name {
        gender_by_name(morph, name)
    } else {
        Some(Gender::Femn)
    }
}
