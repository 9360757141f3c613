//! Core identifiers, colors, and error types for Storyloom.
//!
//! This crate provides:
//! - [`NodeId`] - Stable identifiers for story nodes
//! - [`Color`] - Presentation colors understood by every presenter
//! - [`Error`] - Fatal session errors with node/hook context
//! - [`InputError`] - Recoverable rejections of a player's selection

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod color;
pub mod error;
pub mod id;

pub use color::Color;
pub use error::{Error, ErrorContext, ErrorKind, InputError, Result};
pub use id::NodeId;
