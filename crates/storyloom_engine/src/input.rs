//! Player input: the line editor seam and selection parsing.
//!
//! The engine reads exactly one kind of input, a line holding the number of
//! a listed choice. Everything about where that line comes from sits behind
//! [`LineEditor`].

use std::collections::VecDeque;

use storyloom_foundation::{InputError, Result};
use storyloom_host::ListedChoice;

/// Result of reading a line from the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D, or the input stream ended.
    Eof,
}

/// Abstraction over line input.
///
/// The engine only needs a blocking prompt-and-read, so terminals, pipes, and
/// canned test input all fit behind this trait.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the input fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Records an accepted line, for editors that keep history.
    fn add_history(&mut self, _line: &str) {}
}

/// A line editor that replays a fixed queue of lines, then reports EOF.
#[derive(Clone, Debug, Default)]
pub struct QueuedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl QueuedInput {
    /// Creates an editor that will answer with these lines, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Queues another line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    /// Number of lines not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Every prompt issued so far, one per read.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineEditor for QueuedInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().map_or(ReadResult::Eof, ReadResult::Line))
    }
}

/// Turns one line of input into the 0-based index of a listed choice.
///
/// Surrounding whitespace is ignored. The line must be an integer in
/// `1..=listing.len()` naming an eligible choice.
///
/// # Errors
///
/// Returns the [`InputError`] describing why the line was rejected.
pub fn parse_selection(
    line: &str,
    listing: &[ListedChoice],
) -> std::result::Result<usize, InputError> {
    let trimmed = line.trim();
    let choice: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;

    let index = usize::try_from(choice)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&index| index < listing.len())
        .ok_or(InputError::OutOfRange {
            choice,
            count: listing.len(),
        })?;

    if listing[index].is_eligible() {
        Ok(index)
    } else {
        Err(InputError::Ineligible { choice: index + 1 })
    }
}
