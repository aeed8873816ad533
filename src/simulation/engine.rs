// src/simulation/engine.rs
use crate::core::constants::MAX_SIMULATED_QUBITS;
use crate::core::{QcolorError, Result, StateVector};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;

/// 2x2 gate matrix, row-major.
pub(crate) type Matrix2 = [[Complex<f64>; 2]; 2];

/// Dense state-vector engine working on global wire indices.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    state: StateVector,
    /// `measured[w]` is set once wire `w` has been measured.
    measured: Vec<bool>,
}

impl SimulationEngine {
    /// Initializes |0...0> over `num_qubits` wires.
    pub(crate) fn init(num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_SIMULATED_QUBITS {
            return Err(QcolorError::SimulationError {
                message: format!(
                    "circuit has {} qubits, the simulator supports at most {}",
                    num_qubits, MAX_SIMULATED_QUBITS
                ),
            });
        }
        let dim = 1usize << num_qubits;
        Ok(Self {
            state: StateVector::zero_state(num_qubits, dim),
            measured: vec![false; num_qubits],
        })
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, amplitudes: Vec<Complex<f64>>) -> Result<()> {
        if amplitudes.len() != self.state.dim() {
            return Err(QcolorError::SimulationError {
                message: format!(
                    "cannot set state: provided dimension {} does not match engine dimension {}",
                    amplitudes.len(),
                    self.state.dim()
                ),
            });
        }
        self.state.amplitudes_mut().copy_from_slice(&amplitudes);
        Ok(())
    }

    /// Fails if any of `wires` has already been measured.
    pub(crate) fn ensure_unmeasured(&self, gate: &str, wires: &[usize]) -> Result<()> {
        match wires.iter().find(|&&w| self.measured[w]) {
            Some(w) => Err(QcolorError::InvalidOperation {
                message: format!("'{}' acts on wire {} after it was measured", gate, w),
            }),
            None => Ok(()),
        }
    }

    /// Marks wires as measured. Measurement is terminal, so the state is left
    /// as is and outcomes are read from it afterwards.
    pub(crate) fn measure(&mut self, wires: &[usize]) {
        for &w in wires {
            self.measured[w] = true;
        }
    }

    /// Applies `matrix` to `target` on the subspace where every control wire is 1.
    pub(crate) fn apply_controlled_gate(&mut self, controls: &[usize], target: usize, matrix: &Matrix2) {
        let control_mask = controls.iter().fold(0usize, |mask, &c| mask | (1 << c));
        let k_mask = 1usize << target;
        let lower_mask = k_mask - 1;
        let upper_mask = !lower_mask;
        let amps = self.state.amplitudes_mut();

        // Iterate over pairs of basis states differing only at the target wire.
        for i in 0..amps.len() / 2 {
            let i0 = ((i & upper_mask) << 1) | (i & lower_mask);
            if i0 & control_mask != control_mask {
                continue;
            }
            let i1 = i0 | k_mask;
            let (psi_0, psi_1) = (amps[i0], amps[i1]);
            amps[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amps[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Multiplies every basis state with all `wires` set by `e^(iθ)`.
    pub(crate) fn apply_phase(&mut self, wires: &[usize], theta: f64) {
        let mask = wires.iter().fold(0usize, |mask, &w| mask | (1 << w));
        let factor = Complex::from_polar(1.0, theta);
        for (i, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= factor;
            }
        }
    }
}

pub(crate) fn pauli_x() -> Matrix2 {
    [[Complex::zero(), Complex::one()], [Complex::one(), Complex::zero()]]
}

pub(crate) fn hadamard() -> Matrix2 {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}
