//! CLI module for Parley.

pub mod commands;
mod output;
pub mod preflight;
pub mod repl;

pub use output::Output;

use crate::config::Settings;
use crate::openai::Provider;
use clap::{Parser, Subcommand};

/// Parley - LLM prompting, memory and retrieval walkthroughs
///
/// Each subcommand runs one walkthrough against a hosted chat model:
/// plain calls, prompt templates, output parsing, conversation memory,
/// and retrieval-augmented answering over your own text.
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Chat model provider (openai, groq, gemini)
    #[arg(long, global = true, env = "PARLEY_PROVIDER")]
    pub provider: Option<Provider>,

    /// Chat model to use instead of the configured one
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature (0.0-1.0)
    #[arg(short, long, global = true)]
    pub temperature: Option<f32>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply per-run flag overrides on top of loaded settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(provider) = self.provider {
            if provider != settings.llm.provider {
                // A configured model name belongs to the old provider.
                settings.llm.model = None;
                settings.llm.api_base = None;
            }
            settings.llm.provider = provider;
        }
        if let Some(model) = &self.model {
            settings.llm.model = Some(model.clone());
        }
        if let Some(temperature) = self.temperature {
            settings.llm.temperature = Some(temperature);
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a single message to the model and show the response metadata
    Hello {
        /// Message to send
        #[arg(default_value = "Say hello and explain what LangChain is in 2 sentences.")]
        prompt: String,
    },

    /// Explain a topic for one or more audiences using a prompt template
    Explain {
        /// Audience to explain for (repeatable)
        #[arg(short, long, default_values_t = [
            "5-year-old".to_string(),
            "senior software engineer".to_string(),
        ])]
        audience: Vec<String>,

        /// Topic to explain
        #[arg(long, default_value = "how the internet works")]
        topic: String,

        /// Number of sentences
        #[arg(short, long, default_value = "3")]
        sentences: u32,
    },

    /// Get a fun fact as text, then three facts as JSON
    Facts {
        /// Animal for the plain-text fact
        #[arg(long, default_value = "octopus")]
        animal: String,

        /// Animal for the JSON facts
        #[arg(long, default_value = "dolphin")]
        json_animal: String,
    },

    /// Run a scripted multi-turn conversation that relies on memory
    Converse {
        /// Messages to send, in order
        #[arg(default_values_t = [
            "Hi! My name is Alex.".to_string(),
            "What's my name?".to_string(),
            "What's 2 + 2?".to_string(),
            "Multiply that result by 10.".to_string(),
        ])]
        messages: Vec<String>,
    },

    /// Chat with a concise assistant
    Chat {
        /// Ask one question and exit instead of starting a session
        question: Option<String>,
    },

    /// Answer questions from a small built-in knowledge base
    Rag {
        /// Questions to ask (defaults include one the knowledge base cannot answer)
        questions: Vec<String>,
    },

    /// Index a text file and answer questions about it
    Ask {
        /// Text file to index
        file: String,

        /// Questions to ask (defaults suit demos/knowledge_base.txt)
        questions: Vec<String>,
    },

    /// Index a text file and ask questions about it interactively
    Interactive {
        /// Text file to index
        file: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_walkthroughs() {
        let cli = Cli::try_parse_from(["parley", "explain"]).unwrap();
        match cli.command {
            Commands::Explain { audience, topic, sentences } => {
                assert_eq!(audience, vec!["5-year-old", "senior software engineer"]);
                assert_eq!(topic, "how the internet works");
                assert_eq!(sentences, 3);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["parley", "converse"]).unwrap();
        match cli.command {
            Commands::Converse { messages } => assert_eq!(messages.len(), 4),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_ask_questions_are_optional() {
        let cli = Cli::try_parse_from(["parley", "ask", "notes.txt"]).unwrap();
        match cli.command {
            Commands::Ask { questions, .. } => assert!(questions.is_empty()),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["parley", "ask", "notes.txt", "Who?", "What?"]).unwrap();
        match cli.command {
            Commands::Ask { file, questions } => {
                assert_eq!(file, "notes.txt");
                assert_eq!(questions, vec!["Who?", "What?"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_apply_to_settings() {
        let cli = Cli::try_parse_from([
            "parley",
            "--provider",
            "groq",
            "-t",
            "0.7",
            "chat",
        ])
        .unwrap();

        let mut settings = Settings::default();
        settings.llm.model = Some("gpt-4o".to_string());
        cli.apply_overrides(&mut settings);

        assert_eq!(settings.llm.provider, Provider::Groq);
        assert_eq!(settings.llm.model_name(), "llama-3.3-70b-versatile");
        assert_eq!(settings.llm.temperature, Some(0.7));

        // A command default does not replace the flag.
        settings.llm.default_temperature(0.0);
        assert_eq!(settings.llm.generation_params().unwrap().temperature, 0.7);
    }

    #[test]
    fn test_model_flag_wins_over_provider_default() {
        let cli =
            Cli::try_parse_from(["parley", "--provider", "gemini", "-m", "gemma-3-27b-it", "hello"])
                .unwrap();
        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.llm.model_name(), "gemma-3-27b-it");
    }
}
