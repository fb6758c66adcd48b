#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliArgs, Command, ExceptionCommand, GrammarArgs};
pub use toml_config::AppConfig;
