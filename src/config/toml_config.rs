use crate::core::TemplateNames;
use crate::utils::error::{DeclensionError, Result};
use crate::utils::validation::{
    validate_non_empty_setting, validate_one_of, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub const DEFAULT_EXCEPTIONS_PATH: &str = "./data/exceptions.json";

/// Service settings. Every section may be left out of the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub morphology: MorphologyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_male_name")]
    pub male_common_name: String,
    #[serde(default = "default_female_name")]
    pub female_common_name: String,
}

fn default_male_name() -> String {
    TemplateNames::default().male
}

fn default_female_name() -> String {
    TemplateNames::default().female
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            male_common_name: default_male_name(),
            female_common_name: default_female_name(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Entries live for one process only.
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_exceptions_path")]
    pub exceptions_path: String,
}

fn default_exceptions_path() -> String {
    DEFAULT_EXCEPTIONS_PATH.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            exceptions_path: default_exceptions_path(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphologyConfig {
    /// Replaces the embedded lexicon when set.
    pub lexicon_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeclensionError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeclensionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DeclensionError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn templates(&self) -> TemplateNames {
        TemplateNames {
            male: self.templates.male_common_name.clone(),
            female: self.templates.female_common_name.clone(),
        }
    }

    pub fn exceptions_path(&self) -> &str {
        &self.storage.exceptions_path
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_setting("templates.male_common_name", &self.templates.male_common_name)?;
        validate_non_empty_setting(
            "templates.female_common_name",
            &self.templates.female_common_name,
        )?;

        if self.storage.backend == StorageBackend::File {
            validate_path("storage.exceptions_path", self.exceptions_path())?;
        }

        if let Some(lexicon_path) = &self.morphology.lexicon_path {
            validate_path("morphology.lexicon_path", lexicon_path)?;
        }

        validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)
    }
}
