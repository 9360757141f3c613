//! Integration tests for Layer 0: Foundation
//!
//! Tests for node ids, colors, and the error taxonomy.

mod colors;
mod errors;
