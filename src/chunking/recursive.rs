//! Recursive character splitting.
//!
//! Splits on the most specific separator present in the text, merges the
//! pieces back into windows of at most `chunk_size` characters, and recurses
//! with the less specific separators for any piece that is still too large.
//! Consecutive windows carry over whole trailing pieces of the previous window,
//! up to `chunk_overlap` characters.

use super::{Chunker, ChunkingConfig};
use crate::error::Result;
use std::collections::VecDeque;
use tracing::warn;

/// Recursive character-based splitter.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    config: ChunkingConfig,
}

impl RecursiveCharacterSplitter {
    /// Create a splitter, failing with `InvalidConfig` on bad parameters.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let (separator, remaining) = pick_separator(text, separators);

        let pieces: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut fitting: Vec<String> = Vec::new();

        for piece in pieces {
            if char_len(&piece) <= self.config.chunk_size {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                chunks.extend(self.merge(&fitting, separator));
                fitting.clear();
            }

            if remaining.is_empty() {
                // Nothing left to split on; emit the oversized piece as is.
                chunks.push(piece);
            } else {
                chunks.extend(self.split_recursive(&piece, remaining));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge(&fitting, separator));
        }

        chunks
    }

    /// Greedily join pieces into windows, carrying a tail for overlap.
    fn merge(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);
            let joined_len = |window: &VecDeque<&str>, total: usize| {
                total + len + if window.is_empty() { 0 } else { sep_len }
            };

            if joined_len(&window, total) > size {
                if total > size {
                    warn!("Created a chunk of size {}, which is longer than {}", total, size);
                }
                if !window.is_empty() {
                    push_joined(&mut chunks, &window, separator);

                    while total > overlap || (total > 0 && joined_len(&window, total) > size) {
                        let removed = window.pop_front().map(char_len).unwrap_or(0);
                        total -= removed + if window.is_empty() { 0 } else { sep_len };
                    }
                }
            }

            if !window.is_empty() {
                total += sep_len;
            }
            total += len;
            window.push_back(piece);
        }

        push_joined(&mut chunks, &window, separator);
        chunks
    }
}

impl Chunker for RecursiveCharacterSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.config.separators)
    }
}

/// Choose the first separator that occurs in `text`, returning it together
/// with the separators left for recursion. The empty separator always matches.
fn pick_separator<'a>(text: &str, separators: &'a [String]) -> (&'a str, &'a [String]) {
    for (i, separator) in separators.iter().enumerate() {
        if separator.is_empty() {
            return ("", &[]);
        }
        if text.contains(separator.as_str()) {
            return (separator.as_str(), &separators[i + 1..]);
        }
    }
    match separators.last() {
        Some(last) => (last.as_str(), &[]),
        None => ("", &[]),
    }
}

fn push_joined(chunks: &mut Vec<String>, window: &VecDeque<&str>, separator: &str) {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
