//! Example: Grover search over the 4-colorings of a small graph.
//! Seven vertices, three of them colored in advance. Prints the qubit budget,
//! the circuit cost and the colorings the search makes plausible.

use qcolor::{gate_counts, ColoringProblem, GroverConfig, Simulator, VertexColor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- qcolor Example: 4-coloring a 7-vertex graph ---");

    let problem = ColoringProblem::new(
        &["0", "1", "2", "3", "4", "5", "6"],
        &[
            ("0", "1"),
            ("0", "2"),
            ("1", "2"),
            ("1", "3"),
            ("1", "5"),
            ("2", "4"),
            ("2", "6"),
            ("3", "5"),
            ("4", "5"),
            ("5", "6"),
            ("0", "6"),
            ("3", "6"),
        ],
        &[("0", VertexColor::Red), ("3", VertexColor::Yellow), ("4", VertexColor::Green)],
    )?;

    // 7 valid colorings out of 256: (π/4)·√(256/7) ≈ 4.7, three rounds already
    // put most of the weight on them.
    let config = GroverConfig { repetitions: 3, ..GroverConfig::default() };
    let mut search = problem.grover_circuit(&config)?;

    let budget = search.budget();
    println!(
        "Qubits: {} vertex + {} target + {} auxiliary + {} ancilla = {}",
        budget.vertex_qubits,
        budget.target_qubits,
        budget.auxiliary_qubits,
        budget.ancilla_qubits,
        budget.total()
    );
    println!("Gates ({}): {}", search.circuit().len(), gate_counts(search.circuit()));

    let result = Simulator::new().run(search.circuit())?;
    println!("\nPlausible colorings:");
    for (coloring, probability) in search.coloring_probabilities(&result)? {
        if !problem.is_valid_coloring(&coloring) {
            continue;
        }
        let listing: Vec<String> = coloring.iter().map(|(v, c)| format!("{}={}", v, c)).collect();
        println!("  {:.4}  {}", probability, listing.join(" "));
    }

    // Sampled readout of the vertex registers.
    search.measure_vertices()?;
    let counts = Simulator::new().run(search.circuit())?.counts()?;
    if let Some((bits, n)) = counts.most_frequent() {
        println!("\nMost frequent readout: {} ({} of {} shots)", bits, n, counts.shots());
    }

    Ok(())
}
