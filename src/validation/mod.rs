// src/validation/mod.rs

//! Provides functions to validate simulated states.

use crate::core::{QcolorError, Qubit, Result, StateVector};
use crate::simulation::SimulationResult;

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
const DEFAULT_RESET_TOLERANCE: f64 = 1e-9;

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QcolorError::Incoherence)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QcolorError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that every listed qubit is |0⟩ with certainty.
///
/// Used to verify that scratch and ancilla qubits were returned clean: the
/// probability of reading all zeros on `qubits` must be 1 within tolerance,
/// whatever the state of the other qubits.
pub fn check_qubits_reset(result: &SimulationResult, qubits: &[Qubit], tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_RESET_TOLERANCE);
    let all_zero = result.marginal(qubits)?.first().copied().unwrap_or(0.0);
    let total = result.statevector().norm_sqr();
    if (total - all_zero).abs() > effective_tolerance {
        Err(QcolorError::Incoherence {
            message: format!(
                "{} qubits were expected in |0>, but P(all zero) = {} of total {}",
                qubits.len(),
                all_zero,
                total
            ),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::Circuit;
    use crate::simulation::{Simulator, SimulatorConfig, ValidationMode};

    #[test]
    fn test_normalization_of_zero_state() {
        let state = StateVector::zero_state(2, 4);
        assert!(check_normalization(&state, None).is_ok());
    }

    #[test]
    fn test_dirty_qubit_is_reported() -> Result<()> {
        let mut qc = Circuit::new("dirty");
        let q = qc.add_register("q", 3).qubits();
        qc.h(q[0])?;
        qc.cx(q[0], q[1])?;
        let config = SimulatorConfig { validation: ValidationMode::Off, ..SimulatorConfig::default() };
        let result = Simulator::with_config(config).run(&qc)?;
        assert!(check_qubits_reset(&result, &[q[2]], None).is_ok());
        assert!(matches!(check_qubits_reset(&result, &[q[1], q[2]], None), Err(QcolorError::Incoherence { .. })));
        Ok(())
    }
}
