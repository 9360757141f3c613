//! Traversal state machine, sessions, and choice input for Storyloom.
//!
//! This crate provides:
//! - [`Session`] - One run's state: working story, current node, inventory, script
//! - [`Engine`] - The per-node cycle (cues, hooks, narrative, listing, input, transition)
//! - [`LineEditor`] - The input seam, with [`QueuedInput`] for scripted play
//! - [`parse_selection`] - Validation of one line of player input

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod engine;
pub mod input;
pub mod session;

pub use engine::{Engine, EngineConfig, Outcome, Presented};
pub use input::{LineEditor, QueuedInput, ReadResult, parse_selection};
pub use session::{Session, SessionState};
