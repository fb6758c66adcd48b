pub mod casing;
pub mod declension;
pub mod exceptions;
pub mod names;
pub mod surname;

pub use crate::domain::model::{DeclensionRequest, DeclensionResult, PersonNameRequest, TextRequest};
pub use crate::domain::ports::{ExceptionStore, MorphologyPort};
pub use crate::utils::error::Result;
pub use declension::{DeclensionEngine, TemplateNames};
pub use exceptions::ExceptionResolver;
