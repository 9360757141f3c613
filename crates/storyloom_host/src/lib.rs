//! Host API, presentation surfaces, and script hosts for Storyloom.
//!
//! This crate provides:
//! - [`Presenter`] and [`AudioSink`] - The output surfaces the engine and scripts draw on
//! - [`Host`] - The fixed set of operations a script may perform
//! - [`ScriptHost`] - Runs hooks; implemented by [`NoScript`], [`NativeScript`], and [`LuaHost`]
//! - [`Messages`] - Player-facing strings, configurable per story

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod api;
pub mod lua;
pub mod messages;
pub mod script;
pub mod surface;

pub use api::Host;
pub use lua::LuaHost;
pub use messages::Messages;
pub use script::{NativeScript, NoScript, ScriptHost, run_hook};
pub use surface::{AudioSink, Cue, CueEvent, CueLog, ListedChoice, Presenter, Shown, Transcript};
