use crate::domain::model::{Case, DeclensionRequest, ExceptionUpdate, Gender, NewException, Number};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "declension")]
#[command(about = "Declension of Russian person names and free text")]
pub struct CliArgs {
    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inflect every word of a text
    Text {
        #[command(flatten)]
        grammar: GrammarArgs,
        text: String,
    },
    /// Inflect a "surname name patronymic" full name
    Name {
        #[command(flatten)]
        grammar: GrammarArgs,
        fullname: String,
    },
    /// Manage exception entries
    Exceptions {
        #[command(subcommand)]
        action: ExceptionCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExceptionCommand {
    Add {
        #[command(flatten)]
        grammar: GrammarArgs,
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
    },
    List {
        /// Only entries of this system
        #[arg(long)]
        system: Option<String>,
    },
    /// Distinct system tags in use
    Systems,
    Get {
        id: u64,
    },
    Update {
        id: u64,
        #[command(flatten)]
        grammar: GrammarArgs,
        #[arg(long)]
        source: String,
        #[arg(long)]
        result: String,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct GrammarArgs {
    /// nomn, gent, datv, accs, ablt, loct, voct, gen2, acc2, loc2
    #[arg(long)]
    pub case: Case,

    /// masc, femn or neut; inferred for names when absent
    #[arg(long)]
    pub gender: Option<Gender>,

    /// sing (default) or plur
    #[arg(long)]
    pub number: Option<Number>,

    #[arg(long)]
    pub system: Option<String>,
}

impl GrammarArgs {
    pub fn to_request(&self) -> DeclensionRequest {
        let mut request = DeclensionRequest::new(self.case);
        request.gender = self.gender;
        if let Some(number) = self.number {
            request.number = Some(number);
        }
        request.system = self.system.clone();
        request
    }
}

impl ExceptionCommand {
    pub fn new_exception(grammar: &GrammarArgs, source: &str, target: &str) -> NewException {
        NewException {
            source_text: source.to_string(),
            target_text: target.to_string(),
            params: grammar.to_request(),
        }
    }

    pub fn exception_update(grammar: &GrammarArgs, source: &str, result: &str) -> ExceptionUpdate {
        ExceptionUpdate {
            source_text: source.to_string(),
            result: result.to_string(),
            params: grammar.to_request(),
        }
    }
}
