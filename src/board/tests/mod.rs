//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move path counts against known reference values
//! - `edge_cases.rs` - Special positions and rules interactions
//! - `proptest.rs` - Property-based tests over random playouts
