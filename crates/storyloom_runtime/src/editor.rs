//! Line editors for choice input.
//!
//! [`RustylineEditor`] is used at an interactive terminal. [`StdinEditor`]
//! reads plain lines from any buffered reader, for piped or batch play.

use std::borrow::Cow;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper};
use storyloom_engine::{LineEditor, ReadResult};
use storyloom_foundation::{Error, Result};

/// Rustyline helper that only colors the prompt.
struct PromptHelper {
    color: bool,
}

impl Completer for PromptHelper {
    type Candidate = String;
}

impl Hinter for PromptHelper {
    type Hint = String;
}

impl Validator for PromptHelper {}

impl Highlighter for PromptHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if self.color && default {
            Cow::Owned(format!("\x1b[93m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }
}

impl Helper for PromptHelper {}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<PromptHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new(color: bool) -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(100)
            .map_err(|e| Error::internal(e.to_string()))?
            .build();

        let mut editor =
            Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(PromptHelper { color }));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        read_result(self.editor.readline(prompt))
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

fn read_result(read: std::result::Result<String, ReadlineError>) -> Result<ReadResult> {
    match read {
        Ok(line) => Ok(ReadResult::Line(line)),
        Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
        Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
        // Undecodable bytes are rejected like any other bad choice.
        Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
            Ok(ReadResult::Line(char::REPLACEMENT_CHARACTER.to_string()))
        }
        #[cfg(windows)]
        Err(ReadlineError::Decode(_)) => {
            Ok(ReadResult::Line(char::REPLACEMENT_CHARACTER.to_string()))
        }
        Err(e) => Err(Error::io(e.to_string())),
    }
}

/// A line editor over a plain reader. The prompt goes to `out`.
pub struct StdinEditor<R, W> {
    reader: R,
    out: W,
}

impl StdinEditor<StdinLock<'static>, Stdout> {
    /// Reads from the process's stdin, prompting on stdout.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdinEditor<R, W> {
    /// Creates an editor reading from `reader` and prompting on `out`.
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    /// Consumes the editor, returning the prompt writer.
    pub fn into_output(self) -> W {
        self.out
    }
}

impl<R: BufRead, W: Write> LineEditor for StdinEditor<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(ReadResult::Eof);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(ReadResult::Line(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}
