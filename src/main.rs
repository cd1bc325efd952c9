//! Parley CLI entry point.

use anyhow::Result;
use clap::Parser;
use parley::cli::{commands, Cli, Commands};
use parley::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };
    cli.apply_overrides(&mut settings);

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("parley={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Hello { prompt } => {
            commands::run_hello(prompt, settings).await?;
        }

        Commands::Explain {
            audience,
            topic,
            sentences,
        } => {
            commands::run_explain(audience, topic, *sentences, settings).await?;
        }

        Commands::Facts { animal, json_animal } => {
            commands::run_facts(animal, json_animal, settings).await?;
        }

        Commands::Converse { messages } => {
            commands::run_converse(messages, settings).await?;
        }

        Commands::Chat { question } => {
            commands::run_chat(question.as_deref(), settings).await?;
        }

        Commands::Rag { questions } => {
            commands::run_rag(questions, settings).await?;
        }

        Commands::Ask { file, questions } => {
            commands::run_ask(file, questions, settings).await?;
        }

        Commands::Interactive { file } => {
            commands::run_interactive(file, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
