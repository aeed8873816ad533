// src/circuits/block.rs

use crate::core::{QcolorError, Qubit, Result};
use crate::operations::Operation;
use std::collections::HashSet;
use std::fmt;

/// How a block is undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InverseKind {
    /// The block's unitary is an involution: applying the same sequence again
    /// undoes it. True for the comparators, the symmetric boolean gates and
    /// every multi-controlled NOT.
    SelfInverse,
    /// The block must be undone by replaying its operations in reverse order,
    /// each inverted. True for the full adders.
    ReverseReplay,
}

/// A named, validated gate sequence that can be appended to a circuit.
///
/// Blocks are built from qubit handles alone; resolving the handles against a
/// register layout happens when the block is appended to a `Circuit`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    name: String,
    operations: Vec<Operation>,
    inverse: InverseKind,
}

impl Block {
    pub(crate) fn new(name: impl Into<String>, operations: Vec<Operation>, inverse: InverseKind) -> Self {
        Self { name: name.into(), operations, inverse }
    }

    /// Name used in logs and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The forward gate sequence.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// How `inverse_operations` undoes the block.
    pub fn inverse_kind(&self) -> InverseKind {
        self.inverse
    }

    /// Number of operations in the block.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the block holds no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The gate sequence that undoes this block.
    pub fn inverse_operations(&self) -> Vec<Operation> {
        match self.inverse {
            InverseKind::SelfInverse => self.operations.clone(),
            // Blocks only hold gates, which always have an inverse.
            InverseKind::ReverseReplay => self.operations.iter().rev().filter_map(Operation::inverse).collect(),
        }
    }

    /// Every distinct qubit touched by the block.
    pub fn qubits(&self) -> HashSet<Qubit> {
        self.operations.iter().flat_map(|op| op.involved_qubits()).collect()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{} ops, {:?}]", self.name, self.operations.len(), self.inverse)
    }
}

/// Fails unless `qubits` are pairwise distinct.
pub(crate) fn ensure_distinct(context: &str, qubits: &[Qubit]) -> Result<()> {
    let mut seen = HashSet::with_capacity(qubits.len());
    for qubit in qubits {
        if !seen.insert(*qubit) {
            return Err(QcolorError::InvalidOperation {
                message: format!("{}: qubit {} appears more than once", context, qubit),
            });
        }
    }
    Ok(())
}

/// Fails with `DimensionMismatch` unless exactly `expected` qubits were given.
pub(crate) fn ensure_width(context: &str, qubits: &[Qubit], expected: usize) -> Result<()> {
    if qubits.len() == expected {
        Ok(())
    } else {
        Err(QcolorError::DimensionMismatch {
            context: context.to_string(),
            expected,
            actual: qubits.len(),
        })
    }
}

/// Fails with `InsufficientRegister` unless at least `required` scratch qubits were given.
pub(crate) fn ensure_scratch(context: &str, scratch: &[Qubit], required: usize) -> Result<()> {
    if scratch.len() >= required {
        Ok(())
    } else {
        Err(QcolorError::InsufficientRegister {
            register: context.to_string(),
            required,
            available: scratch.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RegisterId;

    fn q(offset: usize) -> Qubit {
        Qubit::new(RegisterId(0), offset)
    }

    #[test]
    fn test_reverse_replay_inverts_each_operation() {
        let block = Block::new(
            "phase-ladder",
            vec![
                Operation::Phase { target: q(0), theta: 0.5 },
                Operation::Cx { control: q(0), target: q(1) },
            ],
            InverseKind::ReverseReplay,
        );
        assert_eq!(
            block.inverse_operations(),
            vec![
                Operation::Cx { control: q(0), target: q(1) },
                Operation::Phase { target: q(0), theta: -0.5 },
            ]
        );
    }

    #[test]
    fn test_self_inverse_replays_forward_order() {
        let ops = vec![Operation::X { target: q(0) }, Operation::H { target: q(1) }];
        let block = Block::new("replay", ops.clone(), InverseKind::SelfInverse);
        assert_eq!(block.inverse_operations(), ops);
        assert_eq!(block.qubits().len(), 2);
    }

    #[test]
    fn test_guards() {
        assert!(ensure_distinct("ctx", &[q(0), q(1)]).is_ok());
        assert!(ensure_distinct("ctx", &[q(0), q(0)]).is_err());
        assert!(matches!(ensure_width("ctx", &[q(0)], 2), Err(QcolorError::DimensionMismatch { .. })));
        assert!(matches!(ensure_scratch("ctx", &[q(0)], 2), Err(QcolorError::InsufficientRegister { .. })));
    }
}
