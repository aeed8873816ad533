// src/simulation/mod.rs

//! Simulates the execution of `qcolor::circuits::Circuit` on a dense state vector.
//! This module contains the `Simulator` entry point and the internal `SimulationEngine`
//! responsible for evolving the state gate by gate.

mod results;
pub(crate) mod engine;

pub use results::{MeasurementCounts, SimulationResult};

use crate::circuits::Circuit;
use crate::core::{Qubit, Result};
use crate::operations::Operation;
use crate::validation::check_normalization;
use engine::{hadamard, pauli_x, SimulationEngine};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Checks run on the final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    Off,
    /// Fail with `Incoherence` if the final state is not normalized.
    #[default]
    Normalization,
}

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Seed of the sampling PRNG.
    pub seed: u64,
    /// Shots used by `SimulationResult::counts`.
    pub shots: usize,
    pub validation: ValidationMode,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            shots: 1000,
            validation: ValidationMode::Normalization,
        }
    }
}

impl SimulatorConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// The main simulator orchestrating the execution of circuits.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs a simulation of the provided circuit.
    ///
    /// The state starts in |0...0> and every gate is applied in order.
    /// Measurements are terminal: they record which qubits are read out but
    /// leave the state intact, and any later gate on a measured qubit fails
    /// with `InvalidOperation`.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` holding the final state and measured qubits.
    /// * `Err(QcolorError)` if the circuit is too wide, references qubits it
    ///   does not own, or fails the configured validation.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        debug!(
            circuit = circuit.name(),
            qubits = circuit.num_qubits(),
            operations = circuit.len(),
            "starting simulation"
        );
        let mut engine = SimulationEngine::init(circuit.num_qubits())?;
        let mut measured: Vec<Qubit> = Vec::new();

        for op in circuit.operations() {
            let wires = op
                .involved_qubits()
                .into_iter()
                .map(|q| circuit.qubit_index(q))
                .collect::<Result<Vec<_>>>()?;
            match op {
                Operation::Barrier { .. } => continue,
                Operation::Measure { targets } => {
                    engine.measure(&wires);
                    for q in targets {
                        if !measured.contains(q) {
                            measured.push(*q);
                        }
                    }
                    continue;
                }
                _ => engine.ensure_unmeasured(op.name(), &wires)?,
            }
            match op {
                Operation::X { .. } => engine.apply_controlled_gate(&[], wires[0], &pauli_x()),
                Operation::H { .. } => engine.apply_controlled_gate(&[], wires[0], &hadamard()),
                Operation::Z { .. } => engine.apply_phase(&wires, PI),
                Operation::Phase { theta, .. } => engine.apply_phase(&wires, *theta),
                Operation::Cx { .. } => engine.apply_controlled_gate(&wires[..1], wires[1], &pauli_x()),
                Operation::Ccx { .. } => engine.apply_controlled_gate(&wires[..2], wires[2], &pauli_x()),
                Operation::Cz { .. } => engine.apply_phase(&wires, PI),
                Operation::CPhase { theta, .. } => engine.apply_phase(&wires, *theta),
                Operation::Barrier { .. } | Operation::Measure { .. } => {}
            }
        }

        if self.config.validation == ValidationMode::Normalization {
            check_normalization(engine.state(), None)?;
        }
        debug!(measured = measured.len(), "simulation finished");

        Ok(SimulationResult::new(
            engine.into_state(),
            circuit.registers().to_vec(),
            measured,
            self.config.seed,
            self.config.shots,
        ))
    }
}
