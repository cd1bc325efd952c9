//! CLI output formatting utilities.

use crate::document::Chunk;
use crate::llm::ResponseMetadata;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a question and its answer.
    pub fn exchange(question: &str, answer: &str) {
        println!("\n{} {}", style("Q:").yellow().bold(), question);
        println!("{} {}", style("A:").green().bold(), answer);
    }

    /// Print a chunk's position, length and a short preview.
    pub fn chunk(index: usize, chunk: &Chunk) {
        println!(
            "  {} {} chars: \"{}\"",
            style(format!("Chunk {}:", index + 1)).cyan(),
            chunk.char_len(),
            style(chunk.preview(60)).dim()
        );
    }

    /// Print response metadata from the provider.
    pub fn metadata(metadata: &ResponseMetadata) {
        Output::header("Metadata");
        Output::kv("model", &metadata.model);
        if let Some(reason) = &metadata.finish_reason {
            Output::kv("finish reason", reason);
        }
        let tokens = [
            ("prompt tokens", metadata.prompt_tokens),
            ("completion tokens", metadata.completion_tokens),
            ("total tokens", metadata.total_tokens),
        ];
        for (key, value) in tokens {
            if let Some(value) = value {
                Output::kv(key, &value.to_string());
            }
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
