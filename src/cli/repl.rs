//! Line-oriented question loop shared by the interactive commands.

use crate::error::Result;
use async_trait::async_trait;
use console::style;
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Words that end a session, compared case-insensitively.
const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Interpretation of one line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Empty,
    Quit,
    Question(&'a str),
}

impl<'a> ReplInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            ReplInput::Empty
        } else if QUIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w)) {
            ReplInput::Quit
        } else {
            ReplInput::Question(line)
        }
    }
}

/// Something that answers one question per turn.
#[async_trait]
pub trait QuestionHandler: Send {
    async fn answer(&mut self, question: &str) -> Result<String>;
}

/// Prompt and labels for a session.
#[derive(Debug, Clone)]
pub struct Repl {
    pub prompt: String,
    pub answer_label: String,
    pub farewell: String,
}

impl Default for Repl {
    fn default() -> Self {
        Self {
            prompt: "Your question:".to_string(),
            answer_label: "Answer:".to_string(),
            farewell: "Bye!".to_string(),
        }
    }
}

impl Repl {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_answer_label(mut self, label: impl Into<String>) -> Self {
        self.answer_label = label.into();
        self
    }

    /// Run until a quit word, end of input, or `interrupt` resolves.
    ///
    /// `interrupt` is also raced against the answer in flight, so a pending
    /// request is dropped when it fires. A failed turn is reported on `out` and the session continues.
    /// Returns the number of questions answered.
    pub async fn run<R, W, H, I>(
        &self,
        mut input: R,
        out: &mut W,
        handler: &mut H,
        interrupt: I,
    ) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        H: QuestionHandler + ?Sized,
        I: Future<Output = ()>,
    {
        tokio::pin!(interrupt);
        let mut answered = 0;

        loop {
            write!(out, "\n{} ", style(&self.prompt).yellow().bold())?;
            out.flush()?;

            let mut line = String::new();
            let read = tokio::select! {
                read = input.read_line(&mut line) => read?,
                _ = &mut interrupt => {
                    writeln!(out, "\n{}", self.farewell)?;
                    break;
                }
            };

            if read == 0 {
                writeln!(out, "\n{}", self.farewell)?;
                break;
            }

            let question = match ReplInput::parse(&line) {
                ReplInput::Empty => continue,
                ReplInput::Quit => {
                    writeln!(out, "{}", self.farewell)?;
                    break;
                }
                ReplInput::Question(question) => question,
            };

            let result = tokio::select! {
                result = handler.answer(question) => result,
                _ = &mut interrupt => {
                    writeln!(out, "\n{}", self.farewell)?;
                    break;
                }
            };

            match result {
                Ok(answer) => {
                    writeln!(out, "{} {}", style(&self.answer_label).green().bold(), answer)?;
                    answered += 1;
                }
                Err(e) => {
                    writeln!(out, "{} {}", style("Error:").red().bold(), e)?;
                }
            }
        }

        Ok(answered)
    }
}
