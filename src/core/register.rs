// src/core/register.rs

use super::error::{QcolorError, Result};
use std::fmt;

/// Identifier of a register inside the circuit that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(pub usize);

/// Handle to a single qubit: a register plus an offset into it.
///
/// Handles carry no state of their own. Two equal handles alias the same wire
/// of the same simulated state, so copying a handle never duplicates a qubit.
/// A handle only has meaning inside the circuit that allocated its register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qubit {
    register: RegisterId,
    offset: usize,
}

impl Qubit {
    pub(crate) fn new(register: RegisterId, offset: usize) -> Self {
        Self { register, offset }
    }

    /// The register this handle points into.
    pub fn register(&self) -> RegisterId {
        self.register
    }

    /// Position of the qubit inside its register.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}[{}]", self.register.0, self.offset)
    }
}

/// A named, fixed-size, ordered group of qubits.
///
/// Registers are created by `Circuit::add_register`, which assigns them a
/// contiguous block of global wires starting at `start`. The size never
/// changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Register {
    id: RegisterId,
    name: String,
    start: usize,
    size: usize,
}

impl Register {
    pub(crate) fn new(id: RegisterId, name: impl Into<String>, start: usize, size: usize) -> Self {
        Self { id, name: name.into(), start, size }
    }

    /// Identifier of this register within its circuit.
    pub fn id(&self) -> RegisterId {
        self.id
    }

    /// Human readable name. Only used for diagrams and exports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Global wire index of the first qubit.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of qubits in the register.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the register holds no qubits.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Handle to the qubit at `offset`, failing if it lies outside the register.
    pub fn qubit(&self, offset: usize) -> Result<Qubit> {
        if offset < self.size {
            Ok(Qubit::new(self.id, offset))
        } else {
            Err(QcolorError::InvalidQubit {
                qubit: Qubit::new(self.id, offset),
                message: format!("offset {} out of range for register '{}' of size {}", offset, self.name, self.size),
            })
        }
    }

    /// All qubit handles in register order.
    pub fn qubits(&self) -> Vec<Qubit> {
        (0..self.size).map(|offset| Qubit::new(self.id, offset)).collect()
    }

    /// Fails with `DimensionMismatch` unless the register holds exactly `expected` qubits.
    pub fn expect_len(&self, expected: usize, context: &str) -> Result<()> {
        if self.size == expected {
            Ok(())
        } else {
            Err(QcolorError::DimensionMismatch {
                context: format!("{} (register '{}')", context, self.name),
                expected,
                actual: self.size,
            })
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.size)
    }
}
