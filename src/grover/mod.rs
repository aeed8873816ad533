// src/grover/mod.rs

//! Grover amplitude amplification.
//!
//! The amplifier is a small state machine driving a circuit through the
//! initial mixing step and a fixed number of oracle + reflection rounds. It
//! knows nothing about what the oracle marks; anything implementing
//! `PhaseOracle` can be amplified.

pub mod max_cut;
pub mod search;

pub use max_cut::three_cut_search;
pub use search::two_qubit_search;

use crate::circuits::Circuit;
use crate::core::{QcolorError, Qubit, Result};
use crate::logic::{multi_controlled_not, McxMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Appends a phase flip of the marked states to a circuit.
///
/// Implementations must leave every scratch qubit they borrow in |0⟩.
pub trait PhaseOracle {
    fn apply(&self, circuit: &mut Circuit) -> Result<()>;
}

/// Settings for an amplification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroverConfig {
    /// Oracle + reflection rounds after mixing.
    pub repetitions: usize,
    /// Decomposition of the multi-controlled NOT inside the reflection.
    pub reflection_mode: McxMode,
    /// Emit barriers between groups and rounds. Barriers are free in the cost
    /// model and only affect diagrams.
    pub barriers: bool,
}

impl Default for GroverConfig {
    fn default() -> Self {
        Self {
            repetitions: 5,
            reflection_mode: McxMode::Basic,
            barriers: true,
        }
    }
}

impl GroverConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Inversion about the mean over `qubits`.
///
/// `ancillas` must be clean; `McxMode::Basic` borrows `qubits.len() − 3` of them.
pub fn reflection(qc: &mut Circuit, qubits: &[Qubit], ancillas: &[Qubit], mode: McxMode) -> Result<()> {
    let Some((&pivot, rest)) = qubits.split_first() else {
        return Err(QcolorError::InvalidOperation {
            message: "reflection over an empty qubit list".to_string(),
        });
    };
    let flip = multi_controlled_not(rest, pivot, ancillas, mode)?;

    for &q in qubits {
        qc.h(q)?;
        qc.x(q)?;
    }
    qc.h(pivot)?;
    qc.append_block(&flip)?;
    qc.h(pivot)?;
    for &q in qubits {
        qc.x(q)?;
        qc.h(q)?;
    }
    Ok(())
}

/// Where an amplifier is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroverPhase {
    /// Nothing emitted yet.
    Mixing,
    /// Mixing done, `completed` rounds emitted.
    Iterating { completed: usize },
    /// All rounds emitted.
    Done,
}

/// Emits a Grover search for the states marked by `oracle`.
pub struct GroverAmplifier<'a, O: PhaseOracle> {
    oracle: &'a O,
    search: Vec<Qubit>,
    reflection_ancillas: Vec<Qubit>,
    phase_ancilla: Option<Qubit>,
    config: GroverConfig,
    phase: GroverPhase,
}

impl<'a, O: PhaseOracle> GroverAmplifier<'a, O> {
    /// `search` is the register being amplified. `reflection_ancillas` are
    /// borrowed by the reflection and must be clean between oracle calls.
    /// A `phase_ancilla` is prepared in |−⟩ during mixing so that oracles
    /// flipping it kick back a phase.
    pub fn new(
        oracle: &'a O,
        search: Vec<Qubit>,
        reflection_ancillas: Vec<Qubit>,
        phase_ancilla: Option<Qubit>,
        config: GroverConfig,
    ) -> Self {
        Self {
            oracle,
            search,
            reflection_ancillas,
            phase_ancilla,
            config,
            phase: GroverPhase::Mixing,
        }
    }

    pub fn phase(&self) -> GroverPhase {
        self.phase
    }

    /// Emits the next stage into `qc` and returns the new phase. A no-op once `Done`.
    pub fn step(&mut self, qc: &mut Circuit) -> Result<GroverPhase> {
        let next = match self.phase {
            GroverPhase::Mixing => {
                for &q in &self.search {
                    qc.h(q)?;
                }
                if let Some(ancilla) = self.phase_ancilla {
                    qc.x(ancilla)?;
                    qc.h(ancilla)?;
                }
                debug!(qubits = self.search.len(), "mixed search register");
                self.after_round(0)
            }
            GroverPhase::Iterating { completed } => {
                self.oracle.apply(qc)?;
                if self.config.barriers {
                    qc.barrier(self.search.clone())?;
                }
                reflection(qc, &self.search, &self.reflection_ancillas, self.config.reflection_mode)?;
                debug!(round = completed + 1, of = self.config.repetitions, "emitted grover round");
                self.after_round(completed + 1)
            }
            GroverPhase::Done => GroverPhase::Done,
        };
        self.phase = next;
        Ok(next)
    }

    fn after_round(&self, completed: usize) -> GroverPhase {
        if completed >= self.config.repetitions {
            GroverPhase::Done
        } else {
            GroverPhase::Iterating { completed }
        }
    }

    /// Steps until `Done`.
    pub fn run(&mut self, qc: &mut Circuit) -> Result<()> {
        while self.phase != GroverPhase::Done {
            self.step(qc)?;
        }
        Ok(())
    }
}
