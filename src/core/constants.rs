//! Fixed bounds and weights shared across the crate.

/// Largest graph (vertex count) accepted by `ColoringProblem`.
pub const MAX_VERTICES: usize = 11;

/// Largest number of distinct edges accepted by `ColoringProblem`.
pub const MAX_EDGES: usize = 24;

/// Edges evaluated per target qubit by the batch oracle.
pub const EDGE_BATCH_SIZE: usize = 4;

/// Scratch qubits needed by the largest edge batch (4 results + 2 for the AND).
pub const MAX_BATCH_SCRATCH: usize = 6;

/// Weight of a CX gate relative to a single-qubit gate in the cost pass.
pub const CX_COST_WEIGHT: usize = 10;

/// Largest circuit width the dense simulator accepts.
pub const MAX_SIMULATED_QUBITS: usize = 24;
