// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`qcolor::operations::Operation`) over named registers.
//!
//! A `Circuit` owns its register layout and the gate list. Composite pieces of
//! logic are first built as `Block`s (validated gate sequences tagged with
//! how they are inverted) and then appended to a circuit.

pub mod block;
pub mod qasm;

pub use block::{Block, InverseKind};

use crate::core::{QcolorError, Qubit, Register, RegisterId, Result};
use crate::operations::Operation;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// An ordered sequence of operations applied to a fixed register layout.
///
/// Registers are laid out contiguously in allocation order; the global wire of
/// a qubit is `register.start() + offset`.
#[derive(Clone, PartialEq)] // PartialEq useful for testing circuits
pub struct Circuit {
    name: String,
    registers: Vec<Register>,
    num_qubits: usize,
    /// The order is critical: operations are applied front to back.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registers: Vec::new(),
            num_qubits: 0,
            operations: Vec::new(),
        }
    }

    /// Name of the circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Allocates a new register of `size` qubits after all existing ones.
    pub fn add_register(&mut self, name: impl Into<String>, size: usize) -> Register {
        let register = Register::new(RegisterId(self.registers.len()), name, self.num_qubits, size);
        self.num_qubits += size;
        self.registers.push(register.clone());
        register
    }

    /// All registers in allocation order.
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    /// Looks up a register by id.
    pub fn register(&self, id: RegisterId) -> Option<&Register> {
        self.registers.get(id.0)
    }

    /// Total number of wires across all registers.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Resolves a handle to its global wire index.
    pub fn qubit_index(&self, qubit: Qubit) -> Result<usize> {
        let register = self.register(qubit.register()).ok_or_else(|| QcolorError::InvalidQubit {
            qubit,
            message: format!("register id {} is not allocated in circuit '{}'", qubit.register().0, self.name),
        })?;
        if qubit.offset() >= register.len() {
            return Err(QcolorError::InvalidQubit {
                qubit,
                message: format!("offset out of range for register '{}' of size {}", register.name(), register.len()),
            });
        }
        Ok(register.start() + qubit.offset())
    }

    /// Appends a single operation after validating its qubits.
    ///
    /// Every qubit must belong to this circuit and, except for barriers, the
    /// qubits of one operation must be pairwise distinct.
    pub fn add_operation(&mut self, op: Operation) -> Result<()> {
        let qubits = op.involved_qubits();
        for qubit in &qubits {
            self.qubit_index(*qubit)?;
        }
        if !matches!(op, Operation::Barrier { .. }) {
            let mut seen = HashSet::with_capacity(qubits.len());
            for qubit in &qubits {
                if !seen.insert(*qubit) {
                    return Err(QcolorError::InvalidOperation {
                        message: format!("qubit {} used twice in '{}' operation", qubit, op.name()),
                    });
                }
            }
        }
        self.operations.push(op);
        Ok(())
    }

    /// Appends multiple operations, stopping at the first invalid one.
    pub fn add_operations<I>(&mut self, ops: I) -> Result<()>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op)?;
        }
        Ok(())
    }

    /// Appends a block's gate sequence.
    pub fn append_block(&mut self, block: &Block) -> Result<()> {
        self.add_operations(block.operations().iter().cloned())
    }

    /// Appends the inverse of a block, honoring its `InverseKind`.
    pub fn append_block_inverse(&mut self, block: &Block) -> Result<()> {
        self.add_operations(block.inverse_operations())
    }

    /// Appends a bit flip.
    pub fn x(&mut self, target: Qubit) -> Result<()> {
        self.add_operation(Operation::X { target })
    }

    /// Appends a Hadamard.
    pub fn h(&mut self, target: Qubit) -> Result<()> {
        self.add_operation(Operation::H { target })
    }

    /// Appends a phase flip.
    pub fn z(&mut self, target: Qubit) -> Result<()> {
        self.add_operation(Operation::Z { target })
    }

    /// Appends `diag(1, e^(iθ))` on `target`.
    pub fn phase(&mut self, target: Qubit, theta: f64) -> Result<()> {
        self.add_operation(Operation::Phase { target, theta })
    }

    /// Appends a CNOT.
    pub fn cx(&mut self, control: Qubit, target: Qubit) -> Result<()> {
        self.add_operation(Operation::Cx { control, target })
    }

    /// Appends a controlled Z.
    pub fn cz(&mut self, control: Qubit, target: Qubit) -> Result<()> {
        self.add_operation(Operation::Cz { control, target })
    }

    /// Appends a Toffoli onto `target`.
    pub fn ccx(&mut self, first: Qubit, second: Qubit, target: Qubit) -> Result<()> {
        self.add_operation(Operation::Ccx { controls: [first, second], target })
    }

    /// Appends a controlled phase shift of `theta`.
    pub fn cphase(&mut self, control: Qubit, target: Qubit, theta: f64) -> Result<()> {
        self.add_operation(Operation::CPhase { control, target, theta })
    }

    /// Applies H to every qubit of a register.
    pub fn h_register(&mut self, register: &Register) -> Result<()> {
        for qubit in register.qubits() {
            self.h(qubit)?;
        }
        Ok(())
    }

    /// Appends a barrier. Barriers may repeat qubits and have no effect on the state.
    pub fn barrier(&mut self, qubits: Vec<Qubit>) -> Result<()> {
        self.add_operation(Operation::Barrier { qubits })
    }

    /// Marks qubits for terminal measurement.
    pub fn measure(&mut self, targets: Vec<Qubit>) -> Result<()> {
        self.add_operation(Operation::Measure { targets })
    }

    /// Returns a slice containing the ordered sequence of operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Histogram of operation names.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(op.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// The inverse circuit on the same registers: operations reversed and
    /// individually inverted. Fails if the circuit measures anything.
    pub fn inverse(&self) -> Result<Circuit> {
        let mut operations = Vec::with_capacity(self.operations.len());
        for op in self.operations.iter().rev() {
            let inverse = op.inverse().ok_or_else(|| QcolorError::InvalidOperation {
                message: format!("circuit '{}' contains a measurement and cannot be inverted", self.name),
            })?;
            operations.push(inverse);
        }
        Ok(Circuit {
            name: format!("{}_dg", self.name),
            registers: self.registers.clone(),
            num_qubits: self.num_qubits,
            operations,
        })
    }
}

// Implement Default for convenient creation of empty circuits.
impl Default for Circuit {
    fn default() -> Self {
        Self::new("circuit")
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper for constructing `Circuit` instances with method chaining.
///
/// Registers are allocated eagerly (their handles are needed to name
/// operations); operations are chained and the first invalid one is reported
/// by `build`.
pub struct CircuitBuilder {
    circuit: Circuit,
    error: Option<QcolorError>,
}

impl CircuitBuilder {
    /// Creates a new builder around an empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::new(name),
            error: None,
        }
    }

    /// Allocates a register in the circuit being built.
    pub fn add_register(&mut self, name: impl Into<String>, size: usize) -> Register {
        self.circuit.add_register(name, size)
    }

    /// Adds a single operation to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_op(mut self, op: Operation) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.circuit.add_operation(op) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self = self.add_op(op);
        }
        self
    }

    /// Adds a block's gate sequence.
    pub fn add_block(self, block: &Block) -> Self {
        self.add_ops(block.operations().iter().cloned())
    }

    /// Finalizes the construction process and returns the built `Circuit`,
    /// or the first error encountered while chaining.
    pub fn build(self) -> Result<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "{}[0 operations on {} qubits]", self.name, self.num_qubits);
        }

        // --- Setup ---
        let ops = &self.operations;
        let num_ops = ops.len();
        let num_rows = self.num_qubits;

        let labels: Vec<String> = self
            .registers
            .iter()
            .flat_map(|reg| (0..reg.len()).map(move |i| format!("{}[{}]", reg.name(), i)))
            .collect();
        let max_label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the wire segment, v_connect[row][time] the
        // vertical connector drawn below that row.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_rows];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        // Handles were validated on insertion, unresolvable ones are skipped.
        let row = |q: &Qubit| self.qubit_index(*q).ok();

        // --- Populate Grids ---
        for (t, op) in ops.iter().enumerate() {
            let mut cells: Vec<(usize, &str)> = Vec::new();
            let mut connected = true;
            match op {
                Operation::X { target } => cells.extend(row(target).map(|r| (r, "X"))),
                Operation::H { target } => cells.extend(row(target).map(|r| (r, "H"))),
                Operation::Z { target } => cells.extend(row(target).map(|r| (r, "Z"))),
                Operation::Phase { target, .. } => cells.extend(row(target).map(|r| (r, "P"))),
                Operation::Cx { control, target } => {
                    cells.extend(row(control).map(|r| (r, "@")));
                    cells.extend(row(target).map(|r| (r, "X")));
                }
                Operation::Cz { control, target } => {
                    cells.extend(row(control).map(|r| (r, "@")));
                    cells.extend(row(target).map(|r| (r, "@")));
                }
                Operation::Ccx { controls, target } => {
                    for c in controls {
                        cells.extend(row(c).map(|r| (r, "@")));
                    }
                    cells.extend(row(target).map(|r| (r, "X")));
                }
                Operation::CPhase { control, target, .. } => {
                    cells.extend(row(control).map(|r| (r, "@")));
                    cells.extend(row(target).map(|r| (r, "P")));
                }
                Operation::Barrier { qubits } => {
                    cells.extend(qubits.iter().filter_map(|q| row(q).map(|r| (r, "░"))));
                    connected = false;
                }
                Operation::Measure { targets } => {
                    cells.extend(targets.iter().filter_map(|q| row(q).map(|r| (r, "M"))));
                    connected = false;
                }
            }
            for (r, symbol) in &cells {
                op_grid[*r][t] = format_gate(symbol);
            }
            if connected && cells.len() > 1 {
                let r_min = cells.iter().map(|(r, _)| *r).min().unwrap_or(0);
                let r_max = cells.iter().map(|(r, _)| *r).max().unwrap_or(0);
                for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                    row_vec[t] = V_WIRE;
                }
            }
        }

        // --- Format Output String ---
        writeln!(f, "{}[{} operations on {} qubits]", self.name, num_ops, num_rows)?;
        for r in 0..num_rows {
            let label = format!("{}: ", labels[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r + 1 < num_rows {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_are_contiguous() {
        let mut qc = Circuit::new("layout");
        let a = qc.add_register("a", 2);
        let b = qc.add_register("b", 3);
        assert_eq!(qc.num_qubits(), 5);
        assert_eq!(qc.qubit_index(a.qubits()[1]), Ok(1));
        assert_eq!(qc.qubit_index(b.qubits()[0]), Ok(2));
        assert_eq!(qc.qubit_index(b.qubits()[2]), Ok(4));
    }

    #[test]
    fn test_foreign_qubit_is_rejected() {
        let mut other = Circuit::new("other");
        other.add_register("a", 1);
        let foreign = other.add_register("b", 4);

        let mut qc = Circuit::new("small");
        qc.add_register("a", 1);
        let err = qc.x(foreign.qubits()[3]);
        assert!(matches!(err, Err(QcolorError::InvalidQubit { .. })));
        assert!(qc.is_empty());
    }

    #[test]
    fn test_repeated_qubit_is_rejected() {
        let mut qc = Circuit::new("dup");
        let r = qc.add_register("r", 2);
        let q = r.qubits();
        assert!(matches!(qc.cx(q[0], q[0]), Err(QcolorError::InvalidOperation { .. })));
        assert!(qc.barrier(vec![q[0], q[0]]).is_ok());
    }

    #[test]
    fn test_builder_reports_first_error() {
        let mut builder = CircuitBuilder::new("builder");
        let r = builder.add_register("r", 1);
        let q = r.qubits()[0];
        let result = builder
            .add_op(Operation::H { target: q })
            .add_op(Operation::Cx { control: q, target: q })
            .add_op(Operation::X { target: q })
            .build();
        assert!(matches!(result, Err(QcolorError::InvalidOperation { .. })));
    }

    #[test]
    fn test_inverse_reverses_and_negates() -> Result<()> {
        let mut qc = Circuit::new("c");
        let r = qc.add_register("r", 2);
        let q = r.qubits();
        qc.h(q[0])?;
        qc.cphase(q[0], q[1], 0.5)?;
        let inv = qc.inverse()?;
        assert_eq!(
            inv.operations(),
            &[Operation::CPhase { control: q[0], target: q[1], theta: -0.5 }, Operation::H { target: q[0] }]
        );
        qc.measure(vec![q[0]])?;
        assert!(qc.inverse().is_err());
        Ok(())
    }

    #[test]
    fn test_display_draws_connectors() -> Result<()> {
        let mut qc = Circuit::new("diagram");
        let r = qc.add_register("q", 3);
        let q = r.qubits();
        qc.ccx(q[0], q[1], q[2])?;
        let text = format!("{}", qc);
        assert!(text.starts_with("diagram[1 operations on 3 qubits]"));
        assert!(text.contains("q[2]: ───X───"));
        assert_eq!(text.matches('│').count(), 2);
        Ok(())
    }
}
