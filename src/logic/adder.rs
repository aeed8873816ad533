// src/logic/adder.rs

use super::{and_gate, xor_gate};
use crate::circuits::block::{ensure_distinct, ensure_width};
use crate::circuits::{Block, InverseKind};
use crate::core::{Qubit, Result};
use crate::operations::Operation;

/// `carry ⊕= a ∧ b`, `sum ⊕= a ⊕ b`.
pub fn half_adder(a: Qubit, b: Qubit, sum: Qubit, carry: Qubit) -> Result<Block> {
    ensure_distinct("half adder", &[a, b, sum, carry])?;
    let mut ops = and_gate(a, b, carry)?.operations().to_vec();
    ops.extend_from_slice(xor_gate(a, b, sum)?.operations());
    Ok(Block::new("half_adder", ops, InverseKind::SelfInverse))
}

/// Wire budget of a full adder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullAdderLayout {
    /// Inputs, sum and carry only. The partial XOR lives in `sum`.
    FiveQubit,
    /// One scratch qubit holding `a ⊕ b`.
    SixQubit,
    /// Two scratch qubits holding `a ⊕ b` and `a ∧ b`.
    SevenQubit,
}

impl FullAdderLayout {
    pub const ALL: [FullAdderLayout; 3] =
        [FullAdderLayout::FiveQubit, FullAdderLayout::SixQubit, FullAdderLayout::SevenQubit];

    /// Scratch qubits the layout writes to.
    pub fn scratch_qubits(&self) -> usize {
        match self {
            FullAdderLayout::FiveQubit => 0,
            FullAdderLayout::SixQubit => 1,
            FullAdderLayout::SevenQubit => 2,
        }
    }
}

/// Adds three bits: `sum ⊕= a ⊕ b ⊕ c`, `carry ⊕= maj(a, b, c)`.
///
/// The inputs are left untouched but the scratch qubits are not cleaned, so
/// the block is undone with `Circuit::append_block_inverse`.
pub fn full_adder(
    layout: FullAdderLayout,
    a: Qubit,
    b: Qubit,
    c: Qubit,
    scratch: &[Qubit],
    sum: Qubit,
    carry: Qubit,
) -> Result<Block> {
    ensure_width("full adder scratch", scratch, layout.scratch_qubits())?;
    let mut wires = vec![a, b, c, sum, carry];
    wires.extend_from_slice(scratch);
    ensure_distinct("full adder", &wires)?;

    let mut ops = Vec::new();
    match layout {
        FullAdderLayout::FiveQubit => {
            ops.extend_from_slice(half_adder(a, b, sum, carry)?.operations());
            ops.push(Operation::Ccx { controls: [c, sum], target: carry });
            ops.push(Operation::Cx { control: c, target: sum });
        }
        FullAdderLayout::SixQubit => {
            let partial = scratch[0];
            ops.extend_from_slice(half_adder(a, b, partial, carry)?.operations());
            ops.extend_from_slice(half_adder(c, partial, sum, carry)?.operations());
        }
        FullAdderLayout::SevenQubit => {
            let (partial, product) = (scratch[0], scratch[1]);
            ops.extend_from_slice(half_adder(a, b, partial, product)?.operations());
            ops.extend_from_slice(half_adder(c, partial, sum, carry)?.operations());
            ops.push(Operation::Cx { control: product, target: carry });
        }
    }
    Ok(Block::new(format!("full_adder_{}", 5 + layout.scratch_qubits()), ops, InverseKind::ReverseReplay))
}
