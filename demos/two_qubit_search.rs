//! Example: the smallest Grover search, finding |10> on two qubits.
//! Prints the OpenQASM export and the exact outcome distribution.

use qcolor::grover::two_qubit_search;
use qcolor::{total_cost, Circuit, Simulator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- qcolor Example: Grover search on 2 qubits (find |10>) ---");

    let mut qc = Circuit::new("grover2");
    let register = qc.add_register("q", 2);
    let ancilla = qc.add_register("anc", 1).qubit(0)?;
    two_qubit_search(&mut qc, &register, Some(ancilla))?;

    println!("{}", qc);
    println!("Cost: {}", total_cost(&qc));
    println!("\n{}", qc.to_qasm());

    let result = Simulator::new().run(&qc)?;
    for (bits, p) in result.probabilities(&register.qubits())? {
        println!("P(|{}>) = {:.4}", bits, p);
    }
    Ok(())
}
