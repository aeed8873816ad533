// src/grover/max_cut.rs

use super::{GroverAmplifier, GroverConfig, PhaseOracle};
use crate::circuits::{Block, Circuit};
use crate::core::{QcolorError, Qubit, Register, Result};
use crate::logic::{full_adder, xor_gate, FullAdderLayout, McxMode};

/// Edges a three-cut search counts over.
const CUT_EDGES: usize = 3;

/// Marks vertex assignments that cut all three edges.
///
/// Each edge qubit holds `u ⊕ v`, a full adder sums them into two bits and a
/// Toffoli flips the ancilla when the sum is 3. Both steps are undone before
/// returning, so the edge and summation registers stay clean.
struct ThreeCut {
    xors: Vec<Block>,
    adder: Block,
    sum: [Qubit; 2],
    ancilla: Qubit,
}

impl PhaseOracle for ThreeCut {
    fn apply(&self, qc: &mut Circuit) -> Result<()> {
        for xor in &self.xors {
            qc.append_block(xor)?;
        }
        qc.append_block(&self.adder)?;
        qc.ccx(self.sum[0], self.sum[1], self.ancilla)?;
        qc.append_block_inverse(&self.adder)?;
        for xor in &self.xors {
            qc.append_block(xor)?;
        }
        Ok(())
    }
}

/// Appends a two-round Grover search for cuts crossing all three `edges`.
///
/// `edges` index into `vertices`, one qubit per vertex. `edge_register` needs
/// three qubits and `summation` two; both are left in |0⟩. `ancilla` ends in
/// |−⟩. On a star with three leaves the two cutting assignments end up with
/// about 94% of the probability.
pub fn three_cut_search(
    qc: &mut Circuit,
    vertices: &Register,
    edges: &[(usize, usize)],
    edge_register: &Register,
    summation: &Register,
    ancilla: Qubit,
) -> Result<()> {
    if edges.len() != CUT_EDGES {
        return Err(QcolorError::DimensionMismatch {
            context: "three-cut edge list".to_string(),
            expected: CUT_EDGES,
            actual: edges.len(),
        });
    }
    edge_register.expect_len(CUT_EDGES, "three-cut edge register")?;
    summation.expect_len(2, "three-cut summation register")?;

    let mut xors = Vec::with_capacity(CUT_EDGES);
    for (i, &(u, v)) in edges.iter().enumerate().rev() {
        if u == v {
            return Err(QcolorError::InvalidGraph {
                message: format!("self-loop on vertex {}", u),
            });
        }
        xors.push(xor_gate(vertices.qubit(v)?, vertices.qubit(u)?, edge_register.qubit(i)?)?);
    }
    let e = edge_register.qubits();
    let sum = [summation.qubit(0)?, summation.qubit(1)?];
    let adder = full_adder(FullAdderLayout::FiveQubit, e[0], e[1], e[2], &[], sum[0], sum[1])?;

    let oracle = ThreeCut { xors, adder, sum, ancilla };
    let config = GroverConfig {
        repetitions: 2,
        reflection_mode: McxMode::NoAncilla,
        barriers: false,
    };
    GroverAmplifier::new(&oracle, vertices.qubits(), Vec::new(), Some(ancilla), config).run(qc)
}
