// src/costs/mod.rs

//! Gate histogram and weighted cost of a circuit.
//!
//! Costs are computed after lowering every operation to the `{u3, cx}` basis
//! (see `Operation::cost_profile`) and weighting each CX as `CX_COST_WEIGHT`
//! single-qubit gates.

use crate::circuits::Circuit;
use crate::core::constants::CX_COST_WEIGHT;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

/// Gate counts in the `{u3, cx}` basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GateCounts {
    pub single: usize,
    pub cx: usize,
}

impl GateCounts {
    /// `single + CX_COST_WEIGHT · cx`.
    pub fn cost(&self) -> usize {
        self.single + CX_COST_WEIGHT * self.cx
    }
}

impl Add for GateCounts {
    type Output = GateCounts;

    fn add(self, other: GateCounts) -> GateCounts {
        GateCounts {
            single: self.single + other.single,
            cx: self.cx + other.cx,
        }
    }
}

impl fmt::Display for GateCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u3: {}, cx: {}, cost: {}", self.single, self.cx, self.cost())
    }
}

/// Occurrences of each operation name, before lowering.
pub fn count_ops(circuit: &Circuit) -> BTreeMap<String, usize> {
    circuit.count_ops()
}

pub fn gate_counts(circuit: &Circuit) -> GateCounts {
    circuit
        .operations()
        .iter()
        .map(|op| {
            let (single, cx) = op.cost_profile();
            GateCounts { single, cx }
        })
        .fold(GateCounts::default(), Add::add)
}

/// Weighted cost `#u3 + 10 · #cx`.
pub fn total_cost(circuit: &Circuit) -> usize {
    gate_counts(circuit).cost()
}
