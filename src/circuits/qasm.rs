// src/circuits/qasm.rs

//! OpenQASM 2.0 export.

use super::Circuit;
use crate::core::Qubit;
use crate::operations::Operation;
use std::collections::HashSet;
use std::fmt::{self, Write};

/// Maps a register name onto a QASM identifier (`[a-z][A-Za-z0-9_]*`).
fn sanitize(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if !ident.starts_with(|c: char| c.is_ascii_lowercase()) {
        ident.insert_str(0, "r_");
    }
    ident
}

impl Circuit {
    /// Renders the circuit as OpenQASM 2.0.
    ///
    /// Each register becomes a `qreg`. Measured qubits are collected into a
    /// single `creg meas` in the order they are first measured.
    pub fn to_qasm(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_qasm(&mut out);
        out
    }

    fn write_qasm(&self, out: &mut String) -> fmt::Result {
        let mut names = Vec::with_capacity(self.registers.len());
        let mut used = HashSet::new();
        for register in &self.registers {
            let mut ident = sanitize(register.name());
            if !used.insert(ident.clone()) {
                ident = format!("{}_{}", ident, register.id().0);
                used.insert(ident.clone());
            }
            names.push(ident);
        }

        let label = |q: &Qubit| format!("{}[{}]", names[q.register().0], q.offset());

        let measured: Vec<Qubit> = {
            let mut seen = HashSet::new();
            self.operations
                .iter()
                .filter_map(|op| match op {
                    Operation::Measure { targets } => Some(targets.iter()),
                    _ => None,
                })
                .flatten()
                .filter(|q| seen.insert(**q))
                .copied()
                .collect()
        };

        writeln!(out, "OPENQASM 2.0;")?;
        writeln!(out, "include \"qelib1.inc\";")?;
        for (register, name) in self.registers.iter().zip(&names) {
            if !register.is_empty() {
                writeln!(out, "qreg {}[{}];", name, register.len())?;
            }
        }
        if !measured.is_empty() {
            writeln!(out, "creg meas[{}];", measured.len())?;
        }

        for op in &self.operations {
            match op {
                Operation::Phase { target, theta } => {
                    writeln!(out, "u1({}) {};", theta, label(target))?;
                }
                Operation::CPhase { control, target, theta } => {
                    writeln!(out, "cu1({}) {},{};", theta, label(control), label(target))?;
                }
                Operation::Barrier { qubits } => {
                    let args: Vec<String> = qubits.iter().map(&label).collect();
                    writeln!(out, "barrier {};", args.join(","))?;
                }
                Operation::Measure { targets } => {
                    for q in targets {
                        if let Some(bit) = measured.iter().position(|m| m == q) {
                            writeln!(out, "measure {} -> meas[{}];", label(q), bit)?;
                        }
                    }
                }
                gate => {
                    let args: Vec<String> = gate.involved_qubits().iter().map(&label).collect();
                    writeln!(out, "{} {};", gate.name(), args.join(","))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Result;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("v_a"), "v_a");
        assert_eq!(sanitize("v-1"), "v_1");
        assert_eq!(sanitize("Target"), "r_Target");
        assert_eq!(sanitize("7"), "r_7");
    }

    #[test]
    fn test_qasm_listing() -> Result<()> {
        let mut qc = Circuit::new("export");
        let v = qc.add_register("v_1", 2);
        let t = qc.add_register("target", 1);
        let v = v.qubits();
        let t = t.qubits()[0];
        qc.h(v[0])?;
        qc.ccx(v[0], v[1], t)?;
        qc.cphase(v[1], t, 0.5)?;
        qc.barrier(vec![v[0], v[1]])?;
        qc.measure(vec![v[1], v[0]])?;

        let expected = "OPENQASM 2.0;\n\
                        include \"qelib1.inc\";\n\
                        qreg v_1[2];\n\
                        qreg target[1];\n\
                        creg meas[2];\n\
                        h v_1[0];\n\
                        ccx v_1[0],v_1[1],target[0];\n\
                        cu1(0.5) v_1[1],target[0];\n\
                        barrier v_1[0],v_1[1];\n\
                        measure v_1[1] -> meas[0];\n\
                        measure v_1[0] -> meas[1];\n";
        assert_eq!(qc.to_qasm(), expected);
        Ok(())
    }

    #[test]
    fn test_write_qasm_appends_to_buffer() -> fmt::Result {
        let mut qc = Circuit::new("append");
        qc.add_register("q", 1);
        let mut out = String::from("// header\n");
        qc.write_qasm(&mut out)?;
        assert_eq!(out, format!("// header\n{}", qc.to_qasm()));
        Ok(())
    }

    #[test]
    fn test_colliding_names_are_disambiguated() {
        let mut qc = Circuit::new("dup");
        qc.add_register("a-b", 1);
        qc.add_register("a_b", 1);
        let text = qc.to_qasm();
        assert!(text.contains("qreg a_b[1];"));
        assert!(text.contains("qreg a_b_1[1];"));
    }
}
