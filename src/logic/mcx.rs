// src/logic/mcx.rs

use crate::circuits::block::{ensure_distinct, ensure_scratch};
use crate::circuits::{Block, InverseKind};
use crate::core::{Qubit, Result};
use crate::operations::Operation;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Decomposition strategy for a multi-controlled NOT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McxMode {
    /// V-chain of Toffolis through `n − 2` clean ancillas.
    #[default]
    Basic,
    /// Gray-code multi-controlled phase conjugated by H on the target. Uses
    /// no ancilla at the price of `2^n − 1` controlled phases.
    NoAncilla,
}

impl McxMode {
    /// Clean ancillas consumed for `controls` control qubits.
    pub fn ancillas_required(&self, controls: usize) -> usize {
        match self {
            McxMode::Basic => controls.saturating_sub(2),
            McxMode::NoAncilla => 0,
        }
    }
}

/// Flips `target` iff every control is |1⟩.
///
/// With zero controls this is a plain X, with one a CX and with two a Toffoli,
/// whatever the mode. In `Basic` mode only the first `controls.len() − 2`
/// ancillas are touched; they must be |0⟩ on entry and are |0⟩ again on exit.
pub fn multi_controlled_not(controls: &[Qubit], target: Qubit, ancillas: &[Qubit], mode: McxMode) -> Result<Block> {
    let n = controls.len();
    let needed = mode.ancillas_required(n);
    ensure_scratch("mcx ancilla", ancillas, needed)?;
    let ancillas = &ancillas[..needed];

    let mut wires = Vec::with_capacity(n + 1 + needed);
    wires.extend_from_slice(controls);
    wires.push(target);
    wires.extend_from_slice(ancillas);
    ensure_distinct("mcx", &wires)?;

    let operations = match n {
        0 => vec![Operation::X { target }],
        1 => vec![Operation::Cx { control: controls[0], target }],
        2 => vec![Operation::Ccx { controls: [controls[0], controls[1]], target }],
        _ => match mode {
            McxMode::Basic => v_chain(controls, target, ancillas),
            McxMode::NoAncilla => {
                let mut ops = vec![Operation::H { target }];
                ops.extend(gray_code_phase(controls, target, PI));
                ops.push(Operation::H { target });
                ops
            }
        },
    };
    Ok(Block::new(format!("mcx{}", n), operations, InverseKind::SelfInverse))
}

/// Toffoli ladder: `a0 = c0∧c1`, `a_{i−1} = c_i ∧ a_{i−2}`, last rung onto the
/// target, then the ladder is undone. Requires `controls.len() >= 3`.
fn v_chain(controls: &[Qubit], target: Qubit, ancillas: &[Qubit]) -> Vec<Operation> {
    let n = controls.len();
    let mut ladder = Vec::with_capacity(n - 2);
    ladder.push(Operation::Ccx { controls: [controls[0], controls[1]], target: ancillas[0] });
    for i in 2..n - 1 {
        ladder.push(Operation::Ccx { controls: [controls[i], ancillas[i - 2]], target: ancillas[i - 1] });
    }

    let mut ops = ladder.clone();
    ops.push(Operation::Ccx { controls: [controls[n - 1], ancillas[n - 3]], target });
    ops.extend(ladder.into_iter().rev());
    ops
}

/// Applies `e^(iλ)` to the all-ones control state with the target set, using
/// controlled phases of `λ / 2^(n−1)` walked along a gray code over the
/// controls. Parities are accumulated into the leading set control by CX.
fn gray_code_phase(controls: &[Qubit], target: Qubit, lambda: f64) -> Vec<Operation> {
    let n = controls.len();
    let angle = lambda / 2f64.powi((n - 1) as i32);
    let mut ops = Vec::new();
    let mut last: Option<Vec<bool>> = None;

    for g in 1usize..(1 << n) {
        let gray = g ^ (g >> 1);
        // Pattern position 0 is the most significant bit.
        let pattern: Vec<bool> = (0..n).map(|j| (gray >> (n - 1 - j)) & 1 == 1).collect();
        let Some(lead) = pattern.iter().position(|&b| b) else {
            continue;
        };
        let previous = last.get_or_insert_with(|| pattern.clone());

        if let Some(pos) = pattern.iter().zip(previous.iter()).position(|(a, b)| a != b) {
            if pos != lead {
                ops.push(Operation::Cx { control: controls[pos], target: controls[lead] });
            } else {
                for idx in (lead + 1..n).filter(|&idx| pattern[idx]) {
                    ops.push(Operation::Cx { control: controls[idx], target: controls[lead] });
                }
            }
        }

        let ones = pattern.iter().filter(|&&b| b).count();
        let theta = if ones % 2 == 0 { -angle } else { angle };
        ops.push(Operation::CPhase { control: controls[lead], target, theta });
        last = Some(pattern);
    }
    ops
}
