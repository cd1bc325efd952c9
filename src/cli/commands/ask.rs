//! Ask command implementation.

use super::{ensure_ready, print_chunks, GROUNDED_TEMPERATURE};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::document::load_text_file;
use crate::orchestrator::Orchestrator;
use crate::vector_store::{MemoryVectorStore, VectorStore};
use anyhow::Result;
use std::sync::Arc;

/// Asked when none are given; the last one is outside demos/knowledge_base.txt.
const DEFAULT_QUESTIONS: [&str; 5] = [
    "Who created Python?",
    "What is PIP?",
    "What features did Python 3.12 introduce?",
    "Which companies use Python?",
    "What is the capital of Japan?",
];

fn questions_or_default(questions: &[String]) -> Vec<&str> {
    if questions.is_empty() {
        DEFAULT_QUESTIONS.to_vec()
    } else {
        questions.iter().map(String::as_str).collect()
    }
}

/// Load a text file and index it, reporting progress along the way.
pub(super) async fn index_file(
    orchestrator: &Orchestrator,
    file: &str,
) -> Result<Arc<MemoryVectorStore>> {
    Output::info(&format!("Loading {}", file));
    let document = load_text_file(file)?;
    Output::kv("characters", &document.char_len().to_string());

    let spinner = Output::spinner("Creating embeddings and building the index...");
    let result = orchestrator.index_documents(std::slice::from_ref(&document)).await;
    spinner.finish_and_clear();

    let store = result?;
    Output::success(&format!("Split into {} chunks", store.len()));
    print_chunks(store.chunks());

    Ok(store)
}

/// Answer a fixed list of questions about a text file.
pub async fn run_ask(file: &str, questions: &[String], mut settings: Settings) -> Result<()> {
    settings.llm.default_temperature(GROUNDED_TEMPERATURE);
    ensure_ready(Operation::Retrieve, &settings)?;

    let orchestrator = Orchestrator::new(settings)?;
    let store = index_file(&orchestrator, file).await?;
    let chain = orchestrator.rag_chain(store)?;

    Output::header(&format!(
        "Asking {} about {}",
        orchestrator.model().model_name(),
        file
    ));

    for question in questions_or_default(questions) {
        let spinner = Output::spinner("Thinking...");
        let result = chain.ask(question).await;
        spinner.finish_and_clear();

        match result {
            Ok(response) => Output::exchange(question, &response.answer),
            Err(e) => {
                Output::error(&format!("Failed to generate answer: {}", e));
                return Err(e.into());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_default_to_python_walkthrough() {
        let questions = questions_or_default(&[]);
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0], "Who created Python?");
        assert_eq!(questions[4], "What is the capital of Japan?");

        let given = vec!["What is PEP 8?".to_string()];
        assert_eq!(questions_or_default(&given), vec!["What is PEP 8?"]);
    }
}
