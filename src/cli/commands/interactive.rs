//! Interactive RAG over a text file.

use super::ask::index_file;
use super::{ensure_ready, run_session, GROUNDED_TEMPERATURE};
use crate::cli::preflight::Operation;
use crate::cli::repl::{QuestionHandler, Repl};
use crate::config::Settings;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::rag::RagChain;
use async_trait::async_trait;
use console::style;

/// Answers each question from the indexed file.
pub(crate) struct RagHandler {
    chain: RagChain,
}

#[async_trait]
impl QuestionHandler for RagHandler {
    async fn answer(&mut self, question: &str) -> Result<String> {
        let response = self.chain.ask(question).await?;
        Ok(response.answer)
    }
}

/// Index a file, then answer questions until the user quits.
pub async fn run_interactive(file: &str, mut settings: Settings) -> anyhow::Result<()> {
    settings.llm.default_temperature(GROUNDED_TEMPERATURE);
    ensure_ready(Operation::Retrieve, &settings)?;

    let orchestrator = Orchestrator::new(settings)?;
    let store = index_file(&orchestrator, file).await?;
    let mut handler = RagHandler {
        chain: orchestrator.rag_chain(store)?,
    };

    println!("\n{}", style(format!("Ask anything about: {}", file)).bold().cyan());
    println!("{}", style("Type 'quit' or 'exit' to stop.").dim());

    run_session(&Repl::default(), &mut handler).await
}
