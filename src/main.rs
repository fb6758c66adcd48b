use clap::Parser;
use declension::adapters::{open_morphology, open_store};
use declension::config::{Command, ExceptionCommand};
use declension::domain::ports::ExceptionStore;
use declension::utils::error::ErrorSeverity;
use declension::utils::{logger, validation::Validate};
use declension::{AppConfig, CliArgs, DeclensionEngine, ExceptionResolver, LexiconMorphology, Result};
use serde::Serialize;
use std::sync::Arc;

type Engine = DeclensionEngine<dyn ExceptionStore, LexiconMorphology>;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let loaded = load_config(&args);
    let logging = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    if logging.json {
        logger::init_json_logger(&logging.level);
    } else {
        logger::init_cli_logger(args.verbose, &logging.level);
    }

    tracing::info!("Starting declension CLI");
    tracing::debug!("CLI args: {:?}", args);

    let outcome = match loaded {
        Ok(config) => run(args.command, config).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ Declension failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

async fn run(command: Command, config: AppConfig) -> Result<String> {
    let store = open_store(&config).await?;
    let morph = Arc::new(open_morphology(&config)?);
    let engine: Engine = DeclensionEngine::new(ExceptionResolver::new(store), morph, config.templates());

    match command {
        Command::Text { grammar, text } => {
            let request = grammar.to_request().for_text(text);
            to_json(&engine.inflect_text(&request).await?)
        }
        Command::Name { grammar, fullname } => {
            let request = grammar.to_request().for_person(fullname);
            to_json(&engine.inflect_person_name(&request).await?)
        }
        Command::Exceptions { action } => run_exceptions(&engine, action).await,
    }
}

async fn run_exceptions(engine: &Engine, action: ExceptionCommand) -> Result<String> {
    let exceptions = engine.exceptions();
    match action {
        ExceptionCommand::Add {
            grammar,
            source,
            target,
        } => {
            let entry = ExceptionCommand::new_exception(&grammar, &source, &target);
            to_json(&exceptions.create(entry).await?)
        }
        ExceptionCommand::List { system } => match system {
            Some(system) => to_json(&exceptions.list_by_system(&system).await?),
            None => to_json(&exceptions.list_all().await?),
        },
        ExceptionCommand::Systems => to_json(&exceptions.list_systems().await?),
        ExceptionCommand::Get { id } => to_json(&exceptions.get(id).await?),
        ExceptionCommand::Update {
            id,
            grammar,
            source,
            result,
        } => {
            let update = ExceptionCommand::exception_update(&grammar, &source, &result);
            to_json(&exceptions.update(id, update).await?)
        }
        ExceptionCommand::Delete { id } => {
            exceptions.delete(id).await?;
            to_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
