//! Converse command implementation.

use super::{ensure_ready, CREATIVE_TEMPERATURE};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::conversation::ConversationHistory;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use console::style;

/// Play a scripted conversation in which later turns depend on earlier ones.
pub async fn run_converse(messages: &[String], mut settings: Settings) -> Result<()> {
    settings.llm.default_temperature(CREATIVE_TEMPERATURE);
    ensure_ready(Operation::Generate, &settings)?;

    let orchestrator = Orchestrator::new(settings)?;
    let chain = orchestrator.conversation_chain()?;
    let mut history = ConversationHistory::new();

    Output::header("Multi-turn conversation");

    for message in messages {
        println!("\n{} {}", style("You:  ").green().bold(), message);
        let reply = chain.turn(&mut history, message).await?;
        println!("{} {}", style("Buddy:").cyan().bold(), reply);
    }

    println!();
    Output::kv("Total messages in history", &history.len().to_string());

    Ok(())
}
