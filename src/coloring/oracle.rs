// src/coloring/oracle.rs

use super::comparator::{batch_scratch_required, compare_edge_batch, EdgeComparison};
use super::graph::auxiliary_width;
use crate::circuits::{Block, Circuit};
use crate::core::constants::EDGE_BATCH_SIZE;
use crate::core::{QcolorError, Qubit, Register, Result, VertexColor};
use crate::grover::PhaseOracle;
use crate::logic::{multi_controlled_not, McxMode};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Phase oracle marking proper colorings of the free vertices.
///
/// Edges are grouped into batches of at most four, each batch writing its
/// verdict into one target qubit. A multi-controlled NOT over the used target
/// qubits flips the phase ancilla, after which every batch is replayed so the
/// target and auxiliary registers are clean again.
#[derive(Debug, Clone)]
pub struct ColoringOracle {
    batches: Vec<Block>,
    mark: Block,
    auxiliary: Register,
    barriers: bool,
}

/// Splits a canonically ordered edge list into consecutive batches.
pub fn group_edges<T: Clone>(edges: &[T]) -> Vec<Vec<T>> {
    edges.chunks(EDGE_BATCH_SIZE).map(<[T]>::to_vec).collect()
}

fn vertex_pair(vertices: &BTreeMap<String, Register>, id: &str) -> Result<[Qubit; 2]> {
    let register = vertices.get(id).ok_or_else(|| QcolorError::InvalidGraph {
        message: format!("vertex '{}' has no register", id),
    })?;
    register.expect_len(2, "vertex register")?;
    Ok([register.qubit(0)?, register.qubit(1)?])
}

impl ColoringOracle {
    pub fn new(
        vertices: &BTreeMap<String, Register>,
        internal_edges: &BTreeSet<(String, String)>,
        external_edges: &BTreeSet<(String, VertexColor)>,
        auxiliary: &Register,
        target: &Register,
        ancilla: Qubit,
    ) -> Result<Self> {
        let internal = internal_edges
            .iter()
            .map(|(a, b)| {
                Ok(EdgeComparison::Internal {
                    first: vertex_pair(vertices, a)?,
                    second: vertex_pair(vertices, b)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let external = external_edges
            .iter()
            .map(|(v, color)| Ok(EdgeComparison::External { vertex: vertex_pair(vertices, v)?, color: *color }))
            .collect::<Result<Vec<_>>>()?;

        let mut groups = group_edges(&internal);
        groups.extend(group_edges(&external));
        debug!(
            internal = internal.len(),
            external = external.len(),
            groups = groups.len(),
            "grouped edge comparisons"
        );

        if groups.len() > target.len() {
            return Err(QcolorError::InsufficientRegister {
                register: target.name().to_string(),
                required: groups.len(),
                available: target.len(),
            });
        }
        let required = auxiliary_width(vertices.len(), groups.len());
        if auxiliary.len() < required {
            return Err(QcolorError::InsufficientRegister {
                register: auxiliary.name().to_string(),
                required,
                available: auxiliary.len(),
            });
        }

        let pool = auxiliary.qubits();
        let targets: Vec<Qubit> = target.qubits().into_iter().take(groups.len()).collect();
        let batches = groups
            .iter()
            .zip(&targets)
            .map(|(group, &t)| {
                debug!(edges = group.len(), scratch = batch_scratch_required(group.len()), "edge batch");
                compare_edge_batch(group, &pool, t)
            })
            .collect::<Result<Vec<_>>>()?;
        let mark = multi_controlled_not(&targets, ancilla, &pool, McxMode::Basic)?;

        Ok(Self { batches, mark, auxiliary: auxiliary.clone(), barriers: true })
    }

    /// Toggles the barriers emitted before each batch.
    pub fn with_barriers(mut self, barriers: bool) -> Self {
        self.barriers = barriers;
        self
    }

    /// Number of edge batches, which is also the number of target qubits used.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    fn emit_batches(&self, qc: &mut Circuit) -> Result<()> {
        for batch in &self.batches {
            if self.barriers {
                qc.barrier(self.auxiliary.qubits())?;
            }
            qc.append_block(batch)?;
        }
        Ok(())
    }
}

impl PhaseOracle for ColoringOracle {
    fn apply(&self, qc: &mut Circuit) -> Result<()> {
        self.emit_batches(qc)?;
        qc.append_block(&self.mark)?;
        // Batches are involutions acting on disjoint targets, so replaying
        // them in the same order clears every target qubit.
        self.emit_batches(qc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_edges_chunks_of_four() {
        let edges: Vec<u32> = (0..9).collect();
        let groups = group_edges(&edges);
        assert_eq!(groups.iter().map(Vec::len).collect::<Vec<_>>(), vec![4, 4, 1]);
        assert!(group_edges::<u32>(&[]).is_empty());
    }

    #[test]
    fn test_target_register_too_small() {
        let mut qc = Circuit::new("oracle");
        let mut vertices = BTreeMap::new();
        for id in ["a", "b"] {
            vertices.insert(id.to_string(), qc.add_register(format!("v_{}", id), 2));
        }
        let aux = qc.add_register("auxiliary", 6);
        let target = qc.add_register("target", 1);
        let ancilla = qc.add_register("ancilla", 1);

        let internal: BTreeSet<_> = [("a".to_string(), "b".to_string())].into_iter().collect();
        let external: BTreeSet<_> = [("a".to_string(), VertexColor::Red)].into_iter().collect();
        let err = ColoringOracle::new(&vertices, &internal, &external, &aux, &target, ancilla.qubits()[0]);
        assert!(matches!(err, Err(QcolorError::InsufficientRegister { required: 2, available: 1, .. })));
    }

    #[test]
    fn test_auxiliary_register_too_small() {
        let mut qc = Circuit::new("oracle");
        let mut vertices = BTreeMap::new();
        for id in ["a", "b"] {
            vertices.insert(id.to_string(), qc.add_register(format!("v_{}", id), 2));
        }
        let aux = qc.add_register("auxiliary", 5);
        let target = qc.add_register("target", 2);
        let ancilla = qc.add_register("ancilla", 1);

        let internal: BTreeSet<_> = [("a".to_string(), "b".to_string())].into_iter().collect();
        let external: BTreeSet<_> = [("a".to_string(), VertexColor::Red)].into_iter().collect();
        let err = ColoringOracle::new(&vertices, &internal, &external, &aux, &target, ancilla.qubits()[0]);
        match err {
            Err(QcolorError::InsufficientRegister { register, required, available }) => {
                assert_eq!(register, "auxiliary");
                assert_eq!((required, available), (6, 5));
            }
            other => panic!("expected InsufficientRegister, got {:?}", other),
        }
    }
}
