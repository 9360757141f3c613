//! Error types for the Storyloom system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Two families exist and they never mix:
//! - [`Error`] is fatal. It aborts the session that raised it.
//! - [`InputError`] is a rejected selection. The engine re-prompts and no
//!   state changes; it has no conversion into [`Error`].

use std::fmt;

use thiserror::Error;

use crate::id::NodeId;

/// Result type for fallible Storyloom operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Storyloom operations.
#[derive(Debug, Clone, Error)]
#[error("{kind}{}", .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Attaches the node being visited, keeping any hook already recorded.
    #[must_use]
    pub fn at_node(mut self, node: &NodeId) -> Self {
        let context = self.context.take().unwrap_or_default();
        if context.node.is_some() {
            self.context = Some(context);
        } else {
            self.context = Some(context.with_node(node.clone()));
        }
        self
    }

    /// Creates an invalid node error.
    #[must_use]
    pub fn invalid_node(node: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidNode {
            node: node.into(),
            reason: reason.into(),
        })
    }

    /// Creates a broken graph error for a choice whose target does not exist.
    #[must_use]
    pub fn missing_target(from: &NodeId, target: &str) -> Self {
        Self::new(ErrorKind::BrokenGraph(format!(
            "node '{from}' links to missing node '{target}'"
        )))
    }

    /// Creates a broken graph error for an edit aimed at a node that does not exist.
    #[must_use]
    pub fn unknown_node(node: &str) -> Self {
        Self::new(ErrorKind::BrokenGraph(format!("no node with id '{node}'")))
    }

    /// Creates a script error.
    #[must_use]
    pub fn script(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Script(message.into()))
    }

    /// Creates a story load error.
    #[must_use]
    pub fn load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Load(message.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A node failed its required-field checks when it was visited.
    #[error("invalid node '{node}': {reason}")]
    InvalidNode {
        /// Id of the offending node (may be empty if the id itself is missing).
        node: String,
        /// Which invariant was violated.
        reason: String,
    },

    /// A choice target or an edited node id does not resolve.
    #[error("broken graph: {0}")]
    BrokenGraph(String),

    /// A script, hook, or host API call failed.
    #[error("script error: {0}")]
    Script(String),

    /// The story definition could not be loaded.
    #[error("load error: {0}")]
    Load(String),

    /// The runtime configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Node being visited when the error occurred.
    pub node: Option<NodeId>,
    /// Hook that was running, if any.
    pub hook: Option<String>,
    /// Call trail, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node.
    #[must_use]
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// Sets the hook name.
    #[must_use]
    pub fn with_hook(mut self, hook: impl Into<String>) -> Self {
        self.hook = Some(hook.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(node) = &self.node {
            write!(f, "at node '{node}'")?;
            wrote = true;
        }
        if let Some(hook) = &self.hook {
            if wrote {
                f.write_str(", ")?;
            }
            write!(f, "in hook '{hook}'")?;
            wrote = true;
        }
        for frame in &self.stack {
            if wrote {
                f.write_str(", ")?;
            }
            write!(f, "in {frame}")?;
            wrote = true;
        }
        Ok(())
    }
}

/// A rejected player selection.
///
/// Always recoverable: the engine shows a message and asks again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The line was not an integer.
    #[error("not a number: {0:?}")]
    NotANumber(String),

    /// The number is outside `1..=count`.
    #[error("choice {choice} is out of range (1-{count})")]
    OutOfRange {
        /// The number the player typed.
        choice: i64,
        /// How many choices were listed.
        count: usize,
    },

    /// The choice exists but its required items are not all held.
    #[error("choice {choice} is not available")]
    Ineligible {
        /// The 1-based number the player typed.
        choice: usize,
    },
}
