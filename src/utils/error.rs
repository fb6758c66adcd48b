use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeclensionError {
    #[error("Exception {id} not found")]
    NotFound { id: u64 },

    #[error("Exception for '{source_text}' with the same parameters already exists")]
    Conflict { source_text: String },

    #[error("Validation error in '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Lexicon error: {message}")]
    LexiconError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Storage,
    Configuration,
    Morphology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DeclensionError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn lexicon(message: impl Into<String>) -> Self {
        Self::LexiconError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::Conflict { .. } | Self::ValidationError { .. } => {
                ErrorCategory::Request
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::LexiconError { .. } => ErrorCategory::Morphology,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::High,
            Self::NotFound { .. } | Self::Conflict { .. } => ErrorSeverity::Medium,
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { id } => format!("No exception with id {}", id),
            Self::Conflict { source_text } => {
                format!("An exception for '{}' already exists", source_text)
            }
            Self::ValidationError { field, message } => {
                format!("Invalid request: {} ({})", message, field)
            }
            Self::IoError(e) => format!("Could not access a file: {}", e),
            Self::SerializationError(e) => format!("Stored data is malformed: {}", e),
            Self::LexiconError { message } => format!("Could not load the lexicon: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Request => match self {
                Self::NotFound { .. } => "List the stored exceptions to find a valid id",
                Self::Conflict { .. } => "Update the existing exception instead of adding a new one",
                _ => "Provide a non-empty text and a valid case",
            },
            ErrorCategory::Storage => "Check the exceptions file path and its permissions",
            ErrorCategory::Configuration => "Check the TOML configuration file",
            ErrorCategory::Morphology => "Check the lexicon file format",
        }
    }
}

pub type Result<T> = std::result::Result<T, DeclensionError>;
