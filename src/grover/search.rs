// src/grover/search.rs

use super::{GroverAmplifier, GroverConfig, PhaseOracle};
use crate::circuits::Circuit;
use crate::core::{Qubit, Register, Result};
use crate::logic::McxMode;

/// Marks |10⟩ (`q1 = 1`, `q0 = 0`) on a two-qubit register.
///
/// Without an ancilla the phase is applied directly with a CZ; with one, a
/// Toffoli flips an ancilla prepared in |−⟩.
struct MarkTen {
    register: [Qubit; 2],
    ancilla: Option<Qubit>,
}

impl PhaseOracle for MarkTen {
    fn apply(&self, qc: &mut Circuit) -> Result<()> {
        let [q0, q1] = self.register;
        qc.x(q0)?;
        match self.ancilla {
            Some(ancilla) => qc.ccx(q1, q0, ancilla)?,
            None => qc.cz(q1, q0)?,
        }
        qc.x(q0)
    }
}

/// Appends a single-round Grover search for |10⟩ on `register`.
///
/// One round is exact for one marked state out of four, so the register ends
/// in |10⟩ with certainty.
pub fn two_qubit_search(qc: &mut Circuit, register: &Register, ancilla: Option<Qubit>) -> Result<()> {
    register.expect_len(2, "two-qubit search")?;
    let oracle = MarkTen {
        register: [register.qubit(0)?, register.qubit(1)?],
        ancilla,
    };
    let config = GroverConfig {
        repetitions: 1,
        reflection_mode: McxMode::NoAncilla,
        barriers: false,
    };
    GroverAmplifier::new(&oracle, register.qubits(), Vec::new(), ancilla, config).run(qc)
}
