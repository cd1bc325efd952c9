//! Hello command implementation.

use super::{ensure_ready, CREATIVE_TEMPERATURE};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::llm::Message;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Send one human message and print the reply with its metadata.
pub async fn run_hello(prompt: &str, mut settings: Settings) -> Result<()> {
    settings.llm.default_temperature(CREATIVE_TEMPERATURE);
    ensure_ready(Operation::Generate, &settings)?;

    let orchestrator = Orchestrator::new(settings)?;
    let model = orchestrator.model();
    let params = orchestrator.generation_params()?;

    let spinner = Output::spinner(&format!("Asking {}...", model.model_name()));
    let result = model.generate(&[Message::human(prompt)], &params).await;
    spinner.finish_and_clear();

    let completion = match result {
        Ok(completion) => completion,
        Err(e) => {
            Output::error(&format!("Failed to generate response: {}", e));
            return Err(e.into());
        }
    };

    Output::header("Response");
    println!("{}", completion.text);
    Output::metadata(&completion.metadata);

    Ok(())
}
