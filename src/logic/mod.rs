// src/logic/mod.rs

//! Reversible boolean logic.
//!
//! Every function here builds a `Block` over existing qubit handles. Results
//! are accumulated: the target is XORed with the boolean function of the
//! inputs, so it only holds the function itself when it starts in |0⟩.
//! Inputs are never modified.

pub mod adder;
pub mod mcx;

pub use adder::{full_adder, half_adder, FullAdderLayout};
pub use mcx::{multi_controlled_not, McxMode};

use crate::circuits::block::{ensure_distinct, ensure_width};
use crate::circuits::{Block, InverseKind};
use crate::core::{Qubit, Result};
use crate::operations::Operation;

/// Bit flip of `qubit`.
pub fn not_gate(qubit: Qubit) -> Block {
    Block::new("not", vec![Operation::X { target: qubit }], InverseKind::SelfInverse)
}

/// `target ⊕= first ∧ second`.
pub fn and_gate(first: Qubit, second: Qubit, target: Qubit) -> Result<Block> {
    ensure_distinct("and", &[first, second, target])?;
    Ok(Block::new(
        "and",
        vec![Operation::Ccx { controls: [first, second], target }],
        InverseKind::SelfInverse,
    ))
}

/// `target ⊕= first ⊕ second`.
pub fn xor_gate(first: Qubit, second: Qubit, target: Qubit) -> Result<Block> {
    ensure_distinct("xor", &[first, second, target])?;
    Ok(Block::new(
        "xor",
        vec![
            Operation::Cx { control: first, target },
            Operation::Cx { control: second, target },
        ],
        InverseKind::SelfInverse,
    ))
}

/// `target ⊕= first ∨ second`, computed as `a ⊕ b ⊕ ab`.
pub fn or_gate(first: Qubit, second: Qubit, target: Qubit) -> Result<Block> {
    ensure_distinct("or", &[first, second, target])?;
    Ok(Block::new(
        "or",
        vec![
            Operation::Cx { control: first, target },
            Operation::Cx { control: second, target },
            Operation::Ccx { controls: [first, second], target },
        ],
        InverseKind::SelfInverse,
    ))
}

/// AND of three qubits into `target`, borrowing one clean scratch qubit.
pub fn and3(controls: &[Qubit], scratch: Qubit, target: Qubit) -> Result<Block> {
    ensure_width("and3 controls", controls, 3)?;
    let mut block = multi_controlled_not(controls, target, &[scratch], McxMode::Basic)?;
    block.rename("and3");
    Ok(block)
}

/// AND of four qubits into `target`, borrowing two clean scratch qubits.
pub fn and4(controls: &[Qubit], scratch: &[Qubit], target: Qubit) -> Result<Block> {
    ensure_width("and4 controls", controls, 4)?;
    ensure_width("and4 scratch", scratch, 2)?;
    let mut block = multi_controlled_not(controls, target, scratch, McxMode::Basic)?;
    block.rename("and4");
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{QcolorError, RegisterId};

    fn q(offset: usize) -> Qubit {
        Qubit::new(RegisterId(0), offset)
    }

    #[test]
    fn test_gate_shapes() -> Result<()> {
        assert_eq!(not_gate(q(0)).len(), 1);
        assert_eq!(and_gate(q(0), q(1), q(2))?.len(), 1);
        assert_eq!(xor_gate(q(0), q(1), q(2))?.len(), 2);
        assert_eq!(or_gate(q(0), q(1), q(2))?.len(), 3);
        assert!(and_gate(q(0), q(0), q(2)).is_err());
        Ok(())
    }

    #[test]
    fn test_and_widths_checked() {
        assert!(matches!(and3(&[q(0), q(1)], q(5), q(6)), Err(QcolorError::DimensionMismatch { .. })));
        assert!(matches!(
            and4(&[q(0), q(1), q(2), q(3)], &[q(4)], q(6)),
            Err(QcolorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_and4_is_five_toffolis() -> Result<()> {
        let block = and4(&[q(0), q(1), q(2), q(3)], &[q(4), q(5)], q(6))?;
        assert_eq!(block.name(), "and4");
        assert_eq!(block.len(), 5);
        assert!(block.operations().iter().all(|op| matches!(op, Operation::Ccx { .. })));
        Ok(())
    }
}
