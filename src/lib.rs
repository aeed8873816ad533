// src/lib.rs

//! `qcolor` - reversible circuit composition for Grover search over graph 4-colorings
//!
//! This library builds reversible boolean logic (NOT/AND/OR/XOR, multi-input
//! AND reductions, adders), composes it into a phase oracle that checks a
//! 4-coloring of a small graph edge by edge, and amplifies valid colorings
//! with Grover iterations. Circuits can be drawn, exported as OpenQASM 2.0,
//! costed in the `{u3, cx}` basis and simulated exactly on a dense state
//! vector.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod logic;
pub mod coloring;
pub mod grover;
pub mod simulation;
pub mod costs;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{QcolorError, Qubit, Register, RegisterId, Result, StateVector, VertexColor};
pub use operations::Operation;
pub use circuits::{Block, Circuit, CircuitBuilder, InverseKind};
pub use coloring::{Coloring, ColoringCircuit, ColoringOracle, ColoringProblem, QubitBudget};
pub use grover::{GroverAmplifier, GroverConfig, GroverPhase, PhaseOracle};
pub use logic::{FullAdderLayout, McxMode};
pub use simulation::{MeasurementCounts, SimulationResult, Simulator, SimulatorConfig, ValidationMode};
pub use costs::{gate_counts, total_cost, GateCounts};
pub use validation::{check_normalization, check_qubits_reset};

// Example 1: Reversible AND
// Builds a Toffoli-based AND on a superposed input and reads the joint
// distribution of inputs and output.
/// ```
/// use qcolor::{Circuit, Simulator, QcolorError};
/// use qcolor::logic::and_gate;
///
/// fn main() -> Result<(), QcolorError> {
///     let mut qc = Circuit::new("and");
///     let inputs = qc.add_register("in", 2).qubits();
///     let out = qc.add_register("out", 1).qubit(0)?;
///     qc.h(inputs[0])?;
///     qc.h(inputs[1])?;
///     qc.append_block(&and_gate(inputs[0], inputs[1], out)?)?;
///
///     let result = Simulator::new().run(&qc)?;
///     // Bitstrings list `out` leftmost, then in[1], then in[0].
///     let probs = result.probabilities(&[inputs[0], inputs[1], out])?;
///     assert_eq!(probs.len(), 4);
///     assert!((probs["111"] - 0.25).abs() < 1e-9);
///     assert!((probs["001"] - 0.25).abs() < 1e-9);
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Coloring a single free vertex
// `b` is adjacent to three vertices of fixed, distinct colors, so only one
// color is left for it. One Grover round finds it with certainty.
/// ```
/// use qcolor::{ColoringProblem, GroverConfig, Simulator, VertexColor, QcolorError};
///
/// fn main() -> Result<(), QcolorError> {
///     let problem = ColoringProblem::new(
///         &["a", "b", "c", "d"],
///         &[("a", "b"), ("b", "c"), ("b", "d")],
///         &[("a", VertexColor::Red), ("c", VertexColor::Blue), ("d", VertexColor::Yellow)],
///     )?;
///     let config = GroverConfig { repetitions: 1, ..GroverConfig::default() };
///     let search = problem.grover_circuit(&config)?;
///     println!("{} qubits, cost {}", search.budget().total(), qcolor::total_cost(search.circuit()));
///
///     let result = Simulator::new().run(search.circuit())?;
///     let ranked = search.coloring_probabilities(&result)?;
///     let (best, probability) = &ranked[0];
///     assert_eq!(best["b"], VertexColor::Green);
///     assert!(*probability > 0.999);
///     assert!(problem.is_valid_coloring(best));
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = ();
