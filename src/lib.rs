pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::{FileExceptionStore, LexiconMorphology, MemoryExceptionStore};
pub use config::AppConfig;
pub use crate::core::{DeclensionEngine, ExceptionResolver, TemplateNames};
pub use domain::model::{
    Case, DeclensionRequest, DeclensionResult, ExceptionEntry, ExceptionUpdate, Gender,
    NewException, Number, PersonNameRequest, TextRequest,
};
pub use utils::error::{DeclensionError, Result};
