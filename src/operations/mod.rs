// src/operations/mod.rs

//! Defines the primitive gate set circuits are built from.
//!
//! Every composite block in the crate (comparators, AND reductions, adders,
//! multi-controlled NOTs, reflections) expands into these operations. The set
//! is small on purpose: it is what the simulator executes, what the cost pass
//! lowers to `{u3, cx}`, and what the QASM exporter writes out.

use crate::core::Qubit;

/// A single primitive operation on qubit handles.
#[derive(Debug, Clone, PartialEq)] // f64 angles rule out Eq
pub enum Operation {
    /// Bit flip.
    X {
        /// Flipped qubit.
        target: Qubit,
    },

    /// Hadamard.
    H {
        /// Target qubit.
        target: Qubit,
    },

    /// Phase flip (`diag(1, -1)`).
    Z {
        /// Target qubit.
        target: Qubit,
    },

    /// Phase shift `diag(1, e^(iθ))`.
    Phase {
        /// Target qubit.
        target: Qubit,
        /// Angle in radians.
        theta: f64,
    },

    /// Controlled NOT: `target ⊕= control`.
    Cx {
        /// Control qubit.
        control: Qubit,
        /// Target qubit.
        target: Qubit,
    },

    /// Controlled Z. Symmetric in its two qubits.
    Cz {
        /// Control qubit.
        control: Qubit,
        /// Target qubit.
        target: Qubit,
    },

    /// Toffoli: `target ⊕= controls[0] ∧ controls[1]`.
    Ccx {
        /// The two control qubits.
        controls: [Qubit; 2],
        /// Target qubit.
        target: Qubit,
    },

    /// Controlled phase shift, applies `e^(iθ)` when both qubits are 1.
    CPhase {
        /// Control qubit.
        control: Qubit,
        /// Target qubit.
        target: Qubit,
        /// Angle in radians.
        theta: f64,
    },

    /// Scheduling hint with no effect on the state. Used to separate blocks
    /// in diagrams.
    Barrier {
        /// Qubits spanned by the barrier.
        qubits: Vec<Qubit>,
    },

    /// Terminal measurement in the computational basis.
    Measure {
        /// Measured qubits, in classical bit order.
        targets: Vec<Qubit>,
    },
}

impl Operation {
    /// Returns every qubit named by the operation, in parameter order.
    pub fn involved_qubits(&self) -> Vec<Qubit> {
        match self {
            Operation::X { target } | Operation::H { target } | Operation::Z { target } => vec![*target],
            Operation::Phase { target, .. } => vec![*target],
            Operation::Cx { control, target }
            | Operation::Cz { control, target }
            | Operation::CPhase { control, target, .. } => vec![*control, *target],
            Operation::Ccx { controls, target } => vec![controls[0], controls[1], *target],
            Operation::Barrier { qubits } => qubits.clone(),
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// Returns `true` for operations that change the state (everything but
    /// barriers and measurements).
    pub fn is_gate(&self) -> bool {
        !matches!(self, Operation::Barrier { .. } | Operation::Measure { .. })
    }

    /// The inverse operation. Phase angles are negated, every other gate is an
    /// involution. Measurements have no inverse.
    pub fn inverse(&self) -> Option<Operation> {
        match self {
            Operation::Phase { target, theta } => Some(Operation::Phase { target: *target, theta: -theta }),
            Operation::CPhase { control, target, theta } => {
                Some(Operation::CPhase { control: *control, target: *target, theta: -theta })
            }
            Operation::Measure { .. } => None,
            other => Some(other.clone()),
        }
    }

    /// Lowercase gate mnemonic, shared by the histogram and the QASM exporter.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::X { .. } => "x",
            Operation::H { .. } => "h",
            Operation::Z { .. } => "z",
            Operation::Phase { .. } => "u1",
            Operation::Cx { .. } => "cx",
            Operation::Cz { .. } => "cz",
            Operation::Ccx { .. } => "ccx",
            Operation::CPhase { .. } => "cu1",
            Operation::Barrier { .. } => "barrier",
            Operation::Measure { .. } => "measure",
        }
    }

    /// Number of `(single-qubit, cx)` gates after lowering to the `{u3, cx}` basis.
    ///
    /// Cz lowers to H·CX·H, Toffoli to the standard 6-CX/9-single network and
    /// the controlled phase to three phase gates around two CX.
    pub fn cost_profile(&self) -> (usize, usize) {
        match self {
            Operation::X { .. } | Operation::H { .. } | Operation::Z { .. } | Operation::Phase { .. } => (1, 0),
            Operation::Cx { .. } => (0, 1),
            Operation::Cz { .. } => (2, 1),
            Operation::Ccx { .. } => (9, 6),
            Operation::CPhase { .. } => (3, 2),
            Operation::Barrier { .. } | Operation::Measure { .. } => (0, 0),
        }
    }
}
