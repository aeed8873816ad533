// src/simulation/results.rs
use crate::circuits::block::ensure_distinct;
use crate::core::{QcolorError, Qubit, Register, Result, StateVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Amplitudes below this squared magnitude are left out of listings.
const PROBABILITY_FLOOR: f64 = 1e-15;

/// Holds the outcome of a circuit simulation: the final state vector plus
/// what is needed to read it by qubit handle.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    state: StateVector,
    registers: Vec<Register>,
    /// Measured qubits in classical bit order.
    measured: Vec<Qubit>,
    seed: u64,
    shots: usize,
}

impl SimulationResult {
    /// (Internal visibility)
    pub(crate) fn new(state: StateVector, registers: Vec<Register>, measured: Vec<Qubit>, seed: u64, shots: usize) -> Self {
        Self { state, registers, measured, seed, shots }
    }

    /// The final state. Measurements do not collapse it.
    pub fn statevector(&self) -> &StateVector {
        &self.state
    }

    /// Qubits named by `Measure` operations, in classical bit order.
    pub fn measured_qubits(&self) -> &[Qubit] {
        &self.measured
    }

    fn wire(&self, qubit: Qubit) -> Result<usize> {
        self.registers
            .get(qubit.register().0)
            .filter(|r| qubit.offset() < r.len())
            .map(|r| r.start() + qubit.offset())
            .ok_or_else(|| QcolorError::InvalidQubit {
                qubit,
                message: "qubit is not part of the simulated circuit".to_string(),
            })
    }

    /// Marginal distribution over `qubits`, indexed so that bit `k` of the
    /// index is the value of `qubits[k]`.
    ///
    /// The qubits must be distinct and no more than the simulated width.
    pub fn marginal(&self, qubits: &[Qubit]) -> Result<Vec<f64>> {
        if qubits.len() > self.state.num_qubits() {
            return Err(QcolorError::DimensionMismatch {
                context: "marginal qubit list".to_string(),
                expected: self.state.num_qubits(),
                actual: qubits.len(),
            });
        }
        ensure_distinct("marginal", qubits)?;
        let wires = qubits.iter().map(|q| self.wire(*q)).collect::<Result<Vec<_>>>()?;
        let mut marginal = vec![0.0; 1usize << wires.len()];
        for (index, amp) in self.state.amplitudes().iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            let outcome = wires
                .iter()
                .enumerate()
                .fold(0usize, |acc, (k, &w)| acc | (((index >> w) & 1) << k));
            marginal[outcome] += p;
        }
        Ok(marginal)
    }

    /// Exact outcome probabilities for measuring `qubits`, keyed by bitstring
    /// with the last listed qubit leftmost. Negligible outcomes are omitted.
    pub fn probabilities(&self, qubits: &[Qubit]) -> Result<BTreeMap<String, f64>> {
        let width = qubits.len();
        Ok(self
            .marginal(qubits)?
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p > PROBABILITY_FLOOR)
            .map(|(outcome, p)| (bitstring(outcome, width), p))
            .collect())
    }

    /// `probabilities` over the measured qubits.
    pub fn measured_probabilities(&self) -> Result<BTreeMap<String, f64>> {
        self.probabilities(&self.measured)
    }

    /// Draws `shots` samples of `qubits` from the final state.
    ///
    /// Sampling is seeded from the simulator configuration, so repeated calls
    /// with the same arguments return the same counts.
    pub fn sample_counts(&self, qubits: &[Qubit], shots: usize) -> Result<MeasurementCounts> {
        let marginal = self.marginal(qubits)?;
        let mut cumulative = Vec::with_capacity(marginal.len());
        let mut total = 0.0;
        for p in &marginal {
            total += p;
            cumulative.push(total);
        }
        if total <= PROBABILITY_FLOOR {
            return Err(QcolorError::SimulationError {
                message: "cannot sample from a zero state".to_string(),
            });
        }
        let fallback = marginal.iter().rposition(|p| *p > 0.0).unwrap_or(0);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut counts = BTreeMap::new();
        for _ in 0..shots {
            let sample = rng.random::<f64>() * total;
            let outcome = cumulative.partition_point(|c| *c <= sample).min(fallback);
            *counts.entry(bitstring(outcome, qubits.len())).or_insert(0) += 1;
        }
        Ok(MeasurementCounts { shots, counts })
    }

    /// Samples the measured qubits with the configured number of shots.
    pub fn counts(&self) -> Result<MeasurementCounts> {
        if self.measured.is_empty() {
            return Err(QcolorError::InvalidOperation {
                message: "circuit contains no measurements".to_string(),
            });
        }
        self.sample_counts(&self.measured, self.shots)
    }
}

fn bitstring(outcome: usize, width: usize) -> String {
    (0..width).rev().map(|k| if (outcome >> k) & 1 == 1 { '1' } else { '0' }).collect()
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.measured.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
            return writeln!(f, "  {}", self.state);
        }
        writeln!(f, "  Measured {} qubits:", self.measured.len())?;
        match self.measured_probabilities() {
            Ok(probabilities) => {
                for (bits, p) in probabilities {
                    writeln!(f, "    {}: {:.4}", bits, p)?;
                }
            }
            Err(e) => writeln!(f, "    <{}>", e)?,
        }
        Ok(())
    }
}

/// Histogram of sampled bitstrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementCounts {
    shots: usize,
    counts: BTreeMap<String, usize>,
}

impl MeasurementCounts {
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Occurrences of `bits`, zero if never sampled.
    pub fn get(&self, bits: &str) -> usize {
        self.counts.get(bits).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &usize)> {
        self.counts.iter()
    }

    /// The most frequent bitstring, ties broken by the smaller string.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(bits, n)| (bits.as_str(), *n))
    }

    /// JSON object `{ "shots": .., "counts": { bitstring: n } }`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| QcolorError::SimulationError {
            message: format!("failed to serialize counts: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitstring_puts_last_qubit_left() {
        assert_eq!(bitstring(0b01, 2), "01");
        assert_eq!(bitstring(0b110, 3), "110");
        assert_eq!(bitstring(0, 0), "");
    }

    #[test]
    fn test_most_frequent_tie_break() {
        let counts = MeasurementCounts {
            shots: 4,
            counts: [("01".to_string(), 2), ("10".to_string(), 2)].into(),
        };
        assert_eq!(counts.most_frequent(), Some(("01", 2)));
        assert_eq!(counts.get("11"), 0);
    }
}
