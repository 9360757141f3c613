//! Integration tests for Layer 3: Engine
//!
//! Tests for the node cycle, choice input, and transitions.

mod scenarios;
