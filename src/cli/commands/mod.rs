//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod converse;
mod explain;
mod facts;
mod hello;
mod interactive;
mod rag;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use converse::run_converse;
pub use explain::run_explain;
pub use facts::run_facts;
pub use hello::run_hello;
pub use interactive::run_interactive;
pub use rag::run_rag;

use crate::cli::preflight::{self, Operation};
use crate::cli::repl::{QuestionHandler, Repl};
use crate::cli::Output;
use crate::config::Settings;
use crate::document::Chunk;
use tokio::io::BufReader;

/// Temperature for open-ended walkthroughs when none is configured.
const CREATIVE_TEMPERATURE: f32 = 0.7;

/// Temperature for parsing and retrieval walkthroughs when none is configured.
const GROUNDED_TEMPERATURE: f32 = 0.0;

/// Run pre-flight checks, reporting failures the same way for every command.
fn ensure_ready(operation: Operation, settings: &Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(operation, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'parley config show' to inspect the active configuration.");
        return Err(e.into());
    }
    Ok(())
}

/// Run a REPL on stdin/stdout that also ends on Ctrl-C.
async fn run_session<H: QuestionHandler>(repl: &Repl, handler: &mut H) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    repl.run(stdin, &mut stdout, handler, interrupt).await?;
    Ok(())
}

/// Print the chunks an index was built from.
fn print_chunks<'a>(chunks: impl IntoIterator<Item = &'a Chunk>) {
    for (i, chunk) in chunks.into_iter().enumerate() {
        Output::chunk(i, chunk);
    }
}
