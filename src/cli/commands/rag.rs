//! Built-in knowledge base RAG walkthrough.

use super::{ensure_ready, print_chunks, GROUNDED_TEMPERATURE};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::document::Document;
use crate::error::Result;
use crate::llm::Role;
use crate::orchestrator::Orchestrator;
use crate::prompt::ChatPromptTemplate;
use crate::rag::{RagChain, PARAGRAPH_SEPARATOR};
use crate::vector_store::VectorStore;

const KNOWLEDGE_BASE: [&str; 3] = [
    "LangChain is a framework for developing applications powered by large language models (LLMs).\n\
     It was created by Harrison Chase and first released in October 2022.\n\
     LangChain provides tools for prompt management, chains, memory, and retrieval-augmented generation.\n\
     The framework supports Python and JavaScript/TypeScript.",
    "Retrieval-Augmented Generation (RAG) is a technique that enhances LLM responses\n\
     by first retrieving relevant documents from a knowledge base, then passing them\n\
     as context to the LLM. This helps reduce hallucinations and keeps responses\n\
     grounded in factual data. RAG was introduced by Facebook AI Research in 2020.",
    "Vector databases store data as high-dimensional vectors (embeddings).\n\
     Popular vector databases include FAISS, Pinecone, Weaviate, and Chroma.\n\
     They enable semantic search - finding documents by meaning rather than keywords.\n\
     FAISS (Facebook AI Similarity Search) is an open-source library for efficient\n\
     similarity search, developed by Meta AI Research.",
];

const DEFAULT_QUESTIONS: [&str; 4] = [
    "What is LangChain and who created it?",
    "What is RAG and why is it useful?",
    "What is FAISS?",
    "What is the capital of France?",
];

const FALLBACK: &str = "I don't have that information.";

/// Paragraph, line and word boundaries only; sentences are not a split point.
const KNOWLEDGE_BASE_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

pub(crate) fn knowledge_base() -> Vec<Document> {
    KNOWLEDGE_BASE
        .iter()
        .enumerate()
        .map(|(i, text)| Document::new(*text).with_metadata("source", format!("builtin-{}", i + 1)))
        .collect()
}

/// Smaller chunks than the file walkthroughs; the documents are short.
pub(crate) fn knowledge_base_settings(mut settings: Settings) -> Settings {
    settings.chunking.chunk_size = 200;
    settings.chunking.chunk_overlap = 50;
    settings.chunking.separators = KNOWLEDGE_BASE_SEPARATORS.iter().map(|s| s.to_string()).collect();
    settings.llm.default_temperature(GROUNDED_TEMPERATURE);
    settings
}

/// Build the chain used by this walkthrough over an already indexed store.
pub(crate) async fn knowledge_base_chain(orchestrator: &Orchestrator) -> Result<RagChain> {
    let store = orchestrator.index_documents(&knowledge_base()).await?;
    Output::info(&format!(
        "Split {} documents into {} chunks",
        KNOWLEDGE_BASE.len(),
        store.len()
    ));
    print_chunks(store.chunks());

    let template = ChatPromptTemplate::from_messages([
        (
            Role::System,
            "Answer the question based ONLY on the following context. \
             If the context doesn't contain the answer, say '{fallback}'\n\n\
             Context:\n{context}",
        ),
        (Role::Human, "{question}"),
    ]);

    Ok(orchestrator
        .rag_chain(store)?
        .with_template(template)
        .with_fallback(FALLBACK)
        .with_separator(PARAGRAPH_SEPARATOR))
}

/// Run the knowledge base walkthrough.
pub async fn run_rag(questions: &[String], settings: Settings) -> anyhow::Result<()> {
    let settings = knowledge_base_settings(settings);
    ensure_ready(Operation::Retrieve, &settings)?;

    let orchestrator = Orchestrator::new(settings)?;
    let chain = knowledge_base_chain(&orchestrator).await?;

    let questions: Vec<&str> = if questions.is_empty() {
        DEFAULT_QUESTIONS.to_vec()
    } else {
        questions.iter().map(String::as_str).collect()
    };

    Output::header("RAG Q&A");
    for question in questions {
        let response = chain.ask(question).await?;
        Output::exchange(question, &response.answer);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::llm::Message;
    use crate::test_support::{FnModel, KeywordEmbedder};
    use std::sync::Arc;

    /// Answers with the fallback unless the context mentions the question's subject.
    fn grounded_model() -> Arc<FnModel<impl Fn(&[Message]) -> Result<String> + Send + Sync>> {
        Arc::new(FnModel::new(|messages: &[Message]| {
            let system = &messages[0].content;
            let question = messages[1].content.to_lowercase();
            let subject = ["langchain", "faiss", "rag", "france"]
                .into_iter()
                .find(|s| question.contains(s))
                .unwrap_or("");
            let context = system.split("Context:\n").nth(1).unwrap_or("").to_lowercase();
            if !subject.is_empty() && context.contains(subject) {
                Ok(format!("Answer about {}", subject))
            } else {
                Ok(FALLBACK.to_string())
            }
        }))
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::with_components(
            knowledge_base_settings(Settings::default()),
            Prompts::default(),
            grounded_model(),
            Arc::new(KeywordEmbedder),
        )
    }

    #[test]
    fn test_knowledge_base_settings() {
        let settings = knowledge_base_settings(Settings::default());
        assert_eq!(settings.chunking.separators, vec!["\n\n", "\n", " ", ""]);
        assert_eq!(settings.llm.temperature, Some(0.0));

        let mut configured = Settings::default();
        configured.llm.temperature = Some(0.4);
        let settings = knowledge_base_settings(configured);
        assert_eq!(settings.llm.temperature, Some(0.4));
    }

    #[tokio::test]
    async fn test_chunks_fit_the_walkthrough_size() {
        let orchestrator = orchestrator();
        let store = orchestrator.index_documents(&knowledge_base()).await.unwrap();
        assert!(store.len() > KNOWLEDGE_BASE.len());
        assert!(store.chunks().all(|c| c.char_len() <= 200));
    }

    #[tokio::test]
    async fn test_answers_and_falls_back() {
        let orchestrator = orchestrator();
        let chain = knowledge_base_chain(&orchestrator).await.unwrap();

        let response = chain.ask("What is LangChain and who created it?").await.unwrap();
        assert_eq!(response.sources.len(), 3);
        assert!(response
            .sources
            .iter()
            .any(|s| s.chunk.text.contains("Harrison Chase")));
        assert_eq!(response.answer, "Answer about langchain");

        let response = chain.ask("What is the capital of France?").await.unwrap();
        assert_eq!(response.answer, FALLBACK);
        assert!(response.is_fallback(chain.fallback()));
    }
}
