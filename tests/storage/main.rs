//! Integration tests for Layer 1: Storage
//!
//! Tests for story loading, the live story graph, and inventory gating.

mod graph;
mod loading;
