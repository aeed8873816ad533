// src/coloring/mod.rs

//! Grover search for proper 4-colorings of small graphs.
//!
//! `ColoringProblem` validates a graph with some vertices colored in advance
//! and splits its edges into internal edges (both endpoints free) and
//! external constraints (a free vertex next to a colored one).
//! `ColoringOracle` turns those into a phase oracle built from the edge
//! comparators, and `ColoringProblem::grover_circuit` wraps it in a
//! `GroverAmplifier`.

pub mod comparator;
pub mod graph;
pub mod oracle;

pub use comparator::{batch_scratch_required, compare_edge_batch, compare_external_edge, compare_internal_edge, EdgeComparison};
pub use graph::{auxiliary_width, target_width, ColoringCircuit, ColoringProblem, QubitBudget};
pub use oracle::{group_edges, ColoringOracle};

use crate::core::VertexColor;
use std::collections::BTreeMap;

/// Color of each free vertex, keyed by vertex id.
pub type Coloring = BTreeMap<String, VertexColor>;
