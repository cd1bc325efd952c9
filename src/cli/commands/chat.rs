//! Interactive chat command.

use super::{ensure_ready, run_session, CREATIVE_TEMPERATURE};
use crate::cli::preflight::Operation;
use crate::cli::repl::{QuestionHandler, Repl};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::prompt::ChatPromptTemplate;
use async_trait::async_trait;
use console::style;

/// Answers each question independently with the concise-assistant prompt.
pub(crate) struct AssistantHandler {
    orchestrator: Orchestrator,
    template: ChatPromptTemplate,
}

impl AssistantHandler {
    pub(crate) fn new(orchestrator: Orchestrator) -> Self {
        let template = orchestrator.prompts().chat.assistant_template();
        Self {
            orchestrator,
            template,
        }
    }
}

#[async_trait]
impl QuestionHandler for AssistantHandler {
    async fn answer(&mut self, question: &str) -> Result<String> {
        let values = self.orchestrator.prompts().values().text("question", question);
        let completion = self.orchestrator.invoke(&self.template, &values).await?;
        Ok(completion.text)
    }
}

/// Run the chat command: one question, or a session until the user quits.
pub async fn run_chat(question: Option<&str>, mut settings: Settings) -> anyhow::Result<()> {
    settings.llm.default_temperature(CREATIVE_TEMPERATURE);
    ensure_ready(Operation::Generate, &settings)?;

    let orchestrator = Orchestrator::new(settings)?;
    let model_name = orchestrator.model().model_name().to_string();
    let mut handler = AssistantHandler::new(orchestrator);

    if let Some(question) = question {
        let spinner = Output::spinner("Thinking...");
        let answer = handler.answer(question).await;
        spinner.finish_and_clear();
        println!("\n{}\n", answer?);
        return Ok(());
    }

    println!("\n{}", style(format!("Parley Chat ({})", model_name)).bold().cyan());
    println!("{}", style("Type your questions, or 'quit' to exit.").dim());

    let repl = Repl::default()
        .with_prompt("You:")
        .with_answer_label("Assistant:");
    run_session(&repl, &mut handler).await
}
