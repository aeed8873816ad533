// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Dense amplitude vector over `num_qubits` wires.
///
/// Bit `k` of an amplitude index is the computational basis value of global
/// wire `k`, so wire 0 is the least significant bit.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// The all-zero basis state |0...0>.
    pub(crate) fn zero_state(num_qubits: usize, dim: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();
        Self { amplitudes, num_qubits }
    }

    /// Provides read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of wires represented.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states (`2^num_qubits`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Squared norm of the whole vector.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        let mut first = true;
        for (i, c) in self.amplitudes.iter().enumerate() {
            if c.norm_sqr() < 1e-12 {
                continue;
            }
            write!(f, "{}|{:0width$b}>: {:.4}", if first { "" } else { ", " }, i, c, width = self.num_qubits)?;
            first = false;
        }
        write!(f, "]")
    }
}
