// src/coloring/graph.rs

use super::oracle::ColoringOracle;
use super::Coloring;
use crate::circuits::Circuit;
use crate::core::constants::{EDGE_BATCH_SIZE, MAX_BATCH_SCRATCH, MAX_EDGES, MAX_VERTICES};
use crate::core::{QcolorError, Qubit, Register, Result, VertexColor};
use crate::grover::{GroverAmplifier, GroverConfig};
use crate::simulation::SimulationResult;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Number of target qubits for `internal` and `external` edge constraints.
pub fn target_width(internal: usize, external: usize) -> usize {
    internal.div_ceil(EDGE_BATCH_SIZE) + external.div_ceil(EDGE_BATCH_SIZE)
}

/// Size of the shared auxiliary pool.
///
/// It must cover the largest edge batch, the multi-controlled NOT over the
/// targets and, together with the freed targets, the reflection over all
/// vertex qubits.
pub fn auxiliary_width(free_vertices: usize, targets: usize) -> usize {
    let batch = MAX_BATCH_SCRATCH as i64;
    let mark = targets as i64 - 2;
    let reflect = 2 * free_vertices as i64 - 3 - targets as i64;
    // `batch` is positive, so the maximum is too.
    batch.max(mark).max(reflect) as usize
}

/// Qubits needed to search colorings of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QubitBudget {
    /// Two per free vertex.
    pub vertex_qubits: usize,
    /// One per edge batch.
    pub target_qubits: usize,
    /// Shared scratch pool for batches, marking and reflection.
    pub auxiliary_qubits: usize,
    /// The phase ancilla.
    pub ancilla_qubits: usize,
}

impl QubitBudget {
    /// Width of the whole search circuit.
    pub fn total(&self) -> usize {
        self.vertex_qubits + self.target_qubits + self.auxiliary_qubits + self.ancilla_qubits
    }
}

/// A graph with some vertices colored in advance, split into what the oracle
/// has to check.
///
/// Edges are undirected and stored as `(smaller id, larger id)`. All
/// collections are ordered by vertex id so circuits are reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoringProblem {
    vertices: BTreeSet<String>,
    edges: BTreeSet<(String, String)>,
    fixed: BTreeMap<String, VertexColor>,
    free: BTreeSet<String>,
    internal_edges: BTreeSet<(String, String)>,
    external_constraints: BTreeSet<(String, VertexColor)>,
}

impl ColoringProblem {
    /// Validates the graph and partitions vertices and edges.
    ///
    /// Fails on more than `MAX_VERTICES` vertices or `MAX_EDGES` distinct
    /// edges, unknown endpoints or colored vertices, self-loops, conflicting
    /// preset colors and adjacent vertices preset to the same color. A graph
    /// without free vertices is rejected as there is nothing to search.
    pub fn new<S: AsRef<str>>(vertices: &[S], edges: &[(S, S)], given_colors: &[(S, VertexColor)]) -> Result<Self> {
        let vertices: BTreeSet<String> = vertices.iter().map(|v| v.as_ref().to_string()).collect();
        if vertices.len() > MAX_VERTICES {
            return Err(QcolorError::InvalidGraph {
                message: format!("at most {} vertices are supported, got {}", MAX_VERTICES, vertices.len()),
            });
        }
        let known = |id: &str, role: &str| -> Result<String> {
            if vertices.contains(id) {
                Ok(id.to_string())
            } else {
                Err(QcolorError::InvalidGraph {
                    message: format!("{} '{}' is not a vertex of the graph", role, id),
                })
            }
        };

        let mut fixed = BTreeMap::new();
        for (id, color) in given_colors {
            let id = known(id.as_ref(), "colored vertex")?;
            if let Some(previous) = fixed.insert(id.clone(), *color) {
                if previous != *color {
                    return Err(QcolorError::InvalidGraph {
                        message: format!("vertex '{}' is colored both {} and {}", id, previous, color),
                    });
                }
            }
        }

        let mut normalized = BTreeSet::new();
        for (a, b) in edges {
            let a = known(a.as_ref(), "edge endpoint")?;
            let b = known(b.as_ref(), "edge endpoint")?;
            if a == b {
                return Err(QcolorError::InvalidGraph {
                    message: format!("self-loop on vertex '{}'", a),
                });
            }
            normalized.insert(if a < b { (a, b) } else { (b, a) });
        }
        if normalized.len() > MAX_EDGES {
            return Err(QcolorError::InvalidGraph {
                message: format!("at most {} edges are supported, got {}", MAX_EDGES, normalized.len()),
            });
        }

        let free: BTreeSet<String> = vertices.iter().filter(|v| !fixed.contains_key(*v)).cloned().collect();
        if free.is_empty() {
            return Err(QcolorError::InvalidGraph {
                message: "every vertex is already colored".to_string(),
            });
        }

        let mut internal_edges = BTreeSet::new();
        let mut external_constraints = BTreeSet::new();
        for (a, b) in &normalized {
            match (fixed.get(a), fixed.get(b)) {
                (None, None) => {
                    internal_edges.insert((a.clone(), b.clone()));
                }
                (Some(color), None) => {
                    external_constraints.insert((b.clone(), *color));
                }
                (None, Some(color)) => {
                    external_constraints.insert((a.clone(), *color));
                }
                (Some(ca), Some(cb)) if ca == cb => {
                    return Err(QcolorError::InconsistentColoring {
                        first: a.clone(),
                        second: b.clone(),
                        color: *ca,
                    });
                }
                (Some(ca), Some(cb)) => {
                    debug!(first = %a, second = %b, %ca, %cb, "dropping edge between differently colored vertices");
                }
            }
        }

        info!(
            uncolored = free.len(),
            internal = internal_edges.len(),
            external = external_constraints.len(),
            "created coloring problem"
        );

        Ok(Self {
            vertices,
            edges: normalized,
            fixed,
            free,
            internal_edges,
            external_constraints,
        })
    }

    /// All vertex ids, free and colored.
    pub fn vertices(&self) -> &BTreeSet<String> {
        &self.vertices
    }

    /// Distinct undirected edges, each as `(smaller id, larger id)`.
    pub fn edges(&self) -> &BTreeSet<(String, String)> {
        &self.edges
    }

    /// Colors given in advance.
    pub fn fixed_colors(&self) -> &BTreeMap<String, VertexColor> {
        &self.fixed
    }

    /// Vertices whose color is searched for.
    pub fn free_vertices(&self) -> &BTreeSet<String> {
        &self.free
    }

    /// Edges between two free vertices.
    pub fn internal_edges(&self) -> &BTreeSet<(String, String)> {
        &self.internal_edges
    }

    /// `(free vertex, forbidden color)` pairs derived from edges to colored vertices.
    pub fn external_constraints(&self) -> &BTreeSet<(String, VertexColor)> {
        &self.external_constraints
    }

    pub fn budget(&self) -> QubitBudget {
        let targets = target_width(self.internal_edges.len(), self.external_constraints.len());
        QubitBudget {
            vertex_qubits: 2 * self.free.len(),
            target_qubits: targets,
            auxiliary_qubits: auxiliary_width(self.free.len(), targets),
            ancilla_qubits: 1,
        }
    }

    /// Whether `coloring` together with the preset colors is proper.
    ///
    /// Colors for preset vertices in `coloring` are ignored; a free vertex
    /// missing from it makes the coloring invalid.
    pub fn is_valid_coloring(&self, coloring: &Coloring) -> bool {
        let color_of = |v: &String| self.fixed.get(v).or_else(|| coloring.get(v));
        self.edges.iter().all(|(a, b)| match (color_of(a), color_of(b)) {
            (Some(ca), Some(cb)) => ca != cb,
            _ => false,
        })
    }

    /// Builds the full search circuit: registers, mixing and
    /// `config.repetitions` oracle + reflection rounds.
    pub fn grover_circuit(&self, config: &GroverConfig) -> Result<ColoringCircuit> {
        let budget = self.budget();
        let mut circuit = Circuit::new("four-color-grover");
        let vertices: BTreeMap<String, Register> = self
            .free
            .iter()
            .map(|id| (id.clone(), circuit.add_register(format!("v_{}", id), 2)))
            .collect();
        let auxiliary = circuit.add_register("auxiliary", budget.auxiliary_qubits);
        let target = circuit.add_register("target", budget.target_qubits);
        let ancilla = circuit.add_register("ancilla", budget.ancilla_qubits);
        let phase_qubit = ancilla.qubit(0)?;

        info!(
            vertex_registers = vertices.len(),
            auxiliary = auxiliary.len(),
            target = target.len(),
            ancilla = ancilla.len(),
            "allocated coloring circuit"
        );

        let oracle = ColoringOracle::new(
            &vertices,
            &self.internal_edges,
            &self.external_constraints,
            &auxiliary,
            &target,
            phase_qubit,
        )?
        .with_barriers(config.barriers);

        let search: Vec<Qubit> = vertices.values().flat_map(Register::qubits).collect();
        let mut scratch = auxiliary.qubits();
        scratch.extend(target.qubits());

        GroverAmplifier::new(&oracle, search, scratch, Some(phase_qubit), config.clone()).run(&mut circuit)?;

        Ok(ColoringCircuit { circuit, vertices, auxiliary, target, ancilla, budget })
    }
}

/// A search circuit together with the registers needed to read it.
#[derive(Debug, Clone)]
pub struct ColoringCircuit {
    circuit: Circuit,
    vertices: BTreeMap<String, Register>,
    auxiliary: Register,
    target: Register,
    ancilla: Register,
    budget: QubitBudget,
}

impl ColoringCircuit {
    /// The search circuit, without measurements unless `measure_vertices` was called.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Consumes the search, keeping only the circuit.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    /// Register of each free vertex, keyed by vertex id.
    pub fn vertex_registers(&self) -> &BTreeMap<String, Register> {
        &self.vertices
    }

    /// The scratch pool. Clean at the end of every round.
    pub fn auxiliary(&self) -> &Register {
        &self.auxiliary
    }

    /// One qubit per edge batch. Clean at the end of every round.
    pub fn target(&self) -> &Register {
        &self.target
    }

    /// Holds the phase ancilla, left in |−⟩.
    pub fn ancilla(&self) -> &Register {
        &self.ancilla
    }

    /// Register sizes the circuit was built with.
    pub fn budget(&self) -> QubitBudget {
        self.budget
    }

    /// Vertex qubits in register order, two per free vertex.
    pub fn vertex_qubits(&self) -> Vec<Qubit> {
        self.vertices.values().flat_map(Register::qubits).collect()
    }

    /// Appends terminal measurements of every vertex qubit.
    pub fn measure_vertices(&mut self) -> Result<()> {
        let qubits = self.vertex_qubits();
        self.circuit.measure(qubits)
    }

    /// Probability of each coloring of the free vertices, most likely first.
    pub fn coloring_probabilities(&self, result: &SimulationResult) -> Result<Vec<(Coloring, f64)>> {
        let qubits = self.vertex_qubits();
        let marginal = result.probabilities(&qubits)?;
        let mut decoded = Vec::with_capacity(marginal.len());
        for (bits, probability) in marginal {
            decoded.push((self.decode(&bits)?, probability));
        }
        decoded.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(decoded)
    }

    /// Colorings whose probability exceeds half of the uniform level `1 / 4^N`.
    pub fn plausible_colorings(&self, result: &SimulationResult) -> Result<Vec<Coloring>> {
        let threshold = 0.5 / 4f64.powi(self.vertices.len() as i32);
        Ok(self
            .coloring_probabilities(result)?
            .into_iter()
            .filter(|(_, p)| *p > threshold)
            .map(|(coloring, _)| coloring)
            .collect())
    }

    /// Reads a bitstring over `vertex_qubits()`, last qubit leftmost.
    fn decode(&self, bits: &str) -> Result<Coloring> {
        let bits = bits.as_bytes();
        let width = 2 * self.vertices.len();
        if bits.len() != width {
            return Err(QcolorError::DimensionMismatch {
                context: "coloring bitstring".to_string(),
                expected: width,
                actual: bits.len(),
            });
        }
        let bit = |k: usize| u8::from(bits[width - 1 - k] == b'1');
        Ok(self
            .vertices
            .keys()
            .enumerate()
            .map(|(i, id)| (id.clone(), VertexColor::from_bits(bit(2 * i) | (bit(2 * i + 1) << 1))))
            .collect())
    }
}
