// src/coloring/comparator.rs

//! Edge comparators.
//!
//! Each comparator XORs `[colors differ]` into a target qubit and leaves the
//! vertex registers as it found them. All of them are involutions.

use crate::circuits::block::{ensure_distinct, ensure_scratch, ensure_width};
use crate::circuits::{Block, InverseKind};
use crate::core::{QcolorError, Qubit, Result, VertexColor};
use crate::logic::{and3, and4, and_gate};
use crate::operations::Operation;

/// `target ⊕= [first ≠ second]` for two 2-qubit vertex registers.
///
/// The second register is temporarily overwritten with `first ⊕ second`, the
/// OR of that difference is accumulated into `target`, then the XOR is undone.
pub fn compare_internal_edge(first: &[Qubit], second: &[Qubit], target: Qubit) -> Result<Block> {
    ensure_width("internal edge (first vertex)", first, 2)?;
    ensure_width("internal edge (second vertex)", second, 2)?;
    ensure_distinct("internal edge", &[first[0], first[1], second[0], second[1], target])?;

    let ops = vec![
        Operation::Cx { control: first[0], target: second[0] },
        Operation::Cx { control: first[1], target: second[1] },
        Operation::Cx { control: second[0], target },
        Operation::Cx { control: second[1], target },
        Operation::Ccx { controls: [second[0], second[1]], target },
        Operation::Cx { control: first[1], target: second[1] },
        Operation::Cx { control: first[0], target: second[0] },
    ];
    Ok(Block::new("compare_internal", ops, InverseKind::SelfInverse))
}

/// `target ⊕= [vertex ≠ color]` for a 2-qubit vertex register and a fixed color.
pub fn compare_external_edge(vertex: &[Qubit], color: VertexColor, target: Qubit) -> Result<Block> {
    ensure_width("external edge", vertex, 2)?;
    ensure_distinct("external edge", &[vertex[0], vertex[1], target])?;

    // Map `color` onto |11> so a single Toffoli detects equality.
    let flips: Vec<Operation> = (0..2)
        .filter(|&i| !color.bit(i))
        .map(|i| Operation::X { target: vertex[i] })
        .collect();

    let mut ops = flips.clone();
    ops.push(Operation::Ccx { controls: [vertex[1], vertex[0]], target });
    ops.extend(flips);
    ops.push(Operation::X { target });
    Ok(Block::new("compare_external", ops, InverseKind::SelfInverse))
}

/// One edge constraint resolved to qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeComparison {
    /// Both endpoints are free vertices.
    Internal {
        first: [Qubit; 2],
        second: [Qubit; 2],
    },
    /// A free vertex adjacent to a vertex of known color.
    External { vertex: [Qubit; 2], color: VertexColor },
}

impl EdgeComparison {
    /// Comparator block writing into `target`.
    pub fn block(&self, target: Qubit) -> Result<Block> {
        match self {
            EdgeComparison::Internal { first, second } => compare_internal_edge(first, second, target),
            EdgeComparison::External { vertex, color } => compare_external_edge(vertex, *color, target),
        }
    }
}

/// Scratch qubits `compare_edge_batch` needs for a batch of `size` edges.
pub fn batch_scratch_required(size: usize) -> usize {
    match size {
        0 | 1 => 0,
        2 => 2,
        3 => 4,
        _ => 6,
    }
}

/// `target ⊕= [every edge of the batch joins differently colored vertices]`.
///
/// Batches of two to four edges first write each comparison into its own
/// scratch qubit, AND them into `target` and then replay the comparisons so
/// that the scratch qubits return to |0⟩. Only the prefix of `scratch` given
/// by `batch_scratch_required` is touched.
pub fn compare_edge_batch(batch: &[EdgeComparison], scratch: &[Qubit], target: Qubit) -> Result<Block> {
    if batch.is_empty() || batch.len() > 4 {
        return Err(QcolorError::InvalidOperation {
            message: format!("edge batches hold between 1 and 4 edges, got {}", batch.len()),
        });
    }
    if batch.len() == 1 {
        return batch[0].block(target);
    }

    let required = batch_scratch_required(batch.len());
    ensure_scratch("edge batch scratch", scratch, required)?;
    let results = &scratch[..batch.len()];

    let mut comparisons = Vec::new();
    for (edge, &result) in batch.iter().zip(results) {
        comparisons.extend_from_slice(edge.block(result)?.operations());
    }

    let reduce = match batch.len() {
        2 => and_gate(results[0], results[1], target)?,
        3 => and3(results, scratch[3], target)?,
        _ => and4(results, &scratch[4..6], target)?,
    };

    let mut ops = comparisons.clone();
    ops.extend_from_slice(reduce.operations());
    ops.extend(comparisons);
    Ok(Block::new(format!("compare_batch{}", batch.len()), ops, InverseKind::SelfInverse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RegisterId;

    fn q(offset: usize) -> Qubit {
        Qubit::new(RegisterId(0), offset)
    }

    #[test]
    fn test_internal_comparator_sequence() -> Result<()> {
        let block = compare_internal_edge(&[q(0), q(1)], &[q(2), q(3)], q(4))?;
        assert_eq!(block.len(), 7);
        assert_eq!(block.operations()[4], Operation::Ccx { controls: [q(2), q(3)], target: q(4) });
        Ok(())
    }

    #[test]
    fn test_external_flips_follow_color_bits() -> Result<()> {
        let green = compare_external_edge(&[q(0), q(1)], VertexColor::Green, q(2))?;
        assert_eq!(green.len(), 2);
        let red = compare_external_edge(&[q(0), q(1)], VertexColor::Red, q(2))?;
        assert_eq!(red.len(), 6);
        let yellow = compare_external_edge(&[q(0), q(1)], VertexColor::Yellow, q(2))?;
        assert_eq!(yellow.operations()[0], Operation::X { target: q(0) });
        Ok(())
    }

    #[test]
    fn test_wrong_vertex_width() {
        let err = compare_internal_edge(&[q(0), q(1), q(5)], &[q(2), q(3)], q(4));
        assert!(matches!(err, Err(QcolorError::DimensionMismatch { expected: 2, actual: 3, .. })));
    }

    #[test]
    fn test_batch_scratch_checked() {
        let edge = EdgeComparison::External { vertex: [q(0), q(1)], color: VertexColor::Blue };
        let other = EdgeComparison::External { vertex: [q(2), q(3)], color: VertexColor::Red };
        let err = compare_edge_batch(&[edge, other, edge], &[q(10), q(11), q(12)], q(20));
        assert!(matches!(err, Err(QcolorError::InsufficientRegister { required: 4, available: 3, .. })));
        assert!(compare_edge_batch(&[], &[], q(20)).is_err());
    }
}
