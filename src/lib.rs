//! Storyloom - Scriptable branching-narrative runtime
//!
//! This crate re-exports all layers of the Storyloom system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: storyloom_runtime    — Console presenter, line editors, config, CLI
//! Layer 3: storyloom_engine     — Node cycle state machine, sessions, choice input
//! Layer 2: storyloom_host       — Host API, output surfaces, script hosts (native, Lua)
//! Layer 1: storyloom_storage    — Story graph, choices, inventory, story loading
//! Layer 0: storyloom_foundation — Core types (NodeId, Color, Error)
//! ```

pub use storyloom_engine as engine;
pub use storyloom_foundation as foundation;
pub use storyloom_host as host;
pub use storyloom_runtime as runtime;
pub use storyloom_storage as storage;
