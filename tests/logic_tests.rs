// tests/logic_tests.rs

use proptest::prelude::*;
use qcolor::logic::{and3, and4, and_gate, full_adder, half_adder, multi_controlled_not, not_gate, or_gate, xor_gate};
use qcolor::{check_qubits_reset, Block, Circuit, FullAdderLayout, McxMode, QcolorError, Qubit, Simulator};

const TOL: f64 = 1e-9;

// Bitstring for values listed in qubit order (last qubit leftmost).
fn bits(values: &[bool]) -> String {
    values.iter().rev().map(|&b| if b { '1' } else { '0' }).collect()
}

// Flips the qubits whose bit is set in `value`.
fn prepare(qc: &mut Circuit, qubits: &[Qubit], value: usize) -> Result<(), QcolorError> {
    for (k, q) in qubits.iter().enumerate() {
        if (value >> k) & 1 == 1 {
            qc.x(*q)?;
        }
    }
    Ok(())
}

// Runs `qc` and returns the single outcome on `qubits`, asserting it is certain.
fn certain_outcome(qc: &Circuit, qubits: &[Qubit]) -> Result<String, QcolorError> {
    let result = Simulator::new().run(qc)?;
    let probs = result.probabilities(qubits)?;
    assert_eq!(probs.len(), 1, "expected a basis state, got {:?}", probs);
    let (outcome, p) = probs.into_iter().next().expect("one outcome");
    assert!((p - 1.0).abs() < TOL);
    Ok(outcome)
}

type GateFn = fn(Qubit, Qubit, Qubit) -> Result<Block, QcolorError>;
type TruthFn = fn(bool, bool) -> bool;

fn two_input_gates() -> Vec<(&'static str, GateFn, TruthFn)> {
    vec![
        ("and", and_gate as GateFn, (|a: bool, b: bool| a && b) as TruthFn),
        ("or", or_gate as GateFn, (|a: bool, b: bool| a || b) as TruthFn),
        ("xor", xor_gate as GateFn, (|a: bool, b: bool| a ^ b) as TruthFn),
    ]
}

#[test]
fn test_not_truth_table() -> Result<(), QcolorError> {
    for input in [false, true] {
        let mut qc = Circuit::new("not");
        let q = qc.add_register("q", 1).qubits();
        prepare(&mut qc, &q, input as usize)?;
        qc.append_block(&not_gate(q[0]))?;
        assert_eq!(certain_outcome(&qc, &q)?, bits(&[!input]));
    }
    Ok(())
}

#[test]
fn test_two_input_truth_tables_accumulate() -> Result<(), QcolorError> {
    for (name, gate, truth) in two_input_gates() {
        for value in 0..8 {
            let (a, b, t) = (value & 1 == 1, value & 2 == 2, value & 4 == 4);
            let mut qc = Circuit::new(name);
            let q = qc.add_register("q", 3).qubits();
            prepare(&mut qc, &q, value)?;
            qc.append_block(&gate(q[0], q[1], q[2])?)?;
            assert_eq!(
                certain_outcome(&qc, &q)?,
                bits(&[a, b, t ^ truth(a, b)]),
                "{} on a={} b={} t={}",
                name,
                a,
                b,
                t
            );
        }
    }
    Ok(())
}

#[test]
fn test_two_input_gates_on_uniform_superposition() -> Result<(), QcolorError> {
    for (name, gate, truth) in two_input_gates() {
        let mut qc = Circuit::new(name);
        let q = qc.add_register("q", 3).qubits();
        qc.h(q[0])?;
        qc.h(q[1])?;
        qc.append_block(&gate(q[0], q[1], q[2])?)?;
        let probs = Simulator::new().run(&qc)?.probabilities(&q)?;
        assert_eq!(probs.len(), 4, "{}", name);
        for a in [false, true] {
            for b in [false, true] {
                let key = bits(&[a, b, truth(a, b)]);
                assert!((probs[&key] - 0.25).abs() < TOL, "{} outcome {}", name, key);
            }
        }
    }
    Ok(())
}

#[test]
fn test_gate_applied_twice_is_identity() -> Result<(), QcolorError> {
    for (name, gate, _) in two_input_gates() {
        let mut qc = Circuit::new(name);
        let q = qc.add_register("q", 3).qubits();
        qc.h(q[0])?;
        qc.h(q[1])?;
        let block = gate(q[0], q[1], q[2])?;
        qc.append_block(&block)?;
        qc.append_block_inverse(&block)?;
        let result = Simulator::new().run(&qc)?;
        check_qubits_reset(&result, &q[2..], None)?;
    }
    Ok(())
}

#[test]
fn test_and3_and4_restore_scratch() -> Result<(), QcolorError> {
    for value in 0..8 {
        let mut qc = Circuit::new("and3");
        let c = qc.add_register("c", 3).qubits();
        let s = qc.add_register("s", 1).qubits();
        let t = qc.add_register("t", 1).qubits();
        prepare(&mut qc, &c, value)?;
        qc.append_block(&and3(&c, s[0], t[0])?)?;
        assert_eq!(certain_outcome(&qc, &[s[0], t[0]])?, bits(&[false, value == 7]));
    }
    for value in 0..16 {
        let mut qc = Circuit::new("and4");
        let c = qc.add_register("c", 4).qubits();
        let s = qc.add_register("s", 2).qubits();
        let t = qc.add_register("t", 1).qubits();
        prepare(&mut qc, &c, value)?;
        qc.append_block(&and4(&c, &s, t[0])?)?;
        assert_eq!(certain_outcome(&qc, &[s[0], s[1], t[0]])?, bits(&[false, false, value == 15]));
    }
    Ok(())
}

#[test]
fn test_half_adder() -> Result<(), QcolorError> {
    for value in 0..4 {
        let (a, b) = (value & 1 == 1, value & 2 == 2);
        let mut qc = Circuit::new("half_adder");
        let q = qc.add_register("q", 4).qubits();
        prepare(&mut qc, &q[..2], value)?;
        qc.append_block(&half_adder(q[0], q[1], q[2], q[3])?)?;
        assert_eq!(certain_outcome(&qc, &q)?, bits(&[a, b, a ^ b, a && b]));
    }
    Ok(())
}

#[test]
fn test_full_adder_layouts_agree() -> Result<(), QcolorError> {
    for layout in FullAdderLayout::ALL {
        for value in 0..8 {
            let (a, b, c) = (value & 1 == 1, value & 2 == 2, value & 4 == 4);
            let mut qc = Circuit::new("full_adder");
            let inputs = qc.add_register("in", 3).qubits();
            let scratch = qc.add_register("scratch", layout.scratch_qubits()).qubits();
            let out = qc.add_register("out", 2).qubits();
            prepare(&mut qc, &inputs, value)?;
            let adder = full_adder(layout, inputs[0], inputs[1], inputs[2], &scratch, out[0], out[1])?;
            qc.append_block(&adder)?;

            let sum = a ^ b ^ c;
            let carry = (a && b) || (c && (a ^ b));
            let mut observed = inputs.clone();
            observed.extend_from_slice(&out);
            assert_eq!(
                certain_outcome(&qc, &observed)?,
                bits(&[a, b, c, sum, carry]),
                "{:?} on {}{}{}",
                layout,
                a,
                b,
                c
            );

            qc.append_block_inverse(&adder)?;
            let result = Simulator::new().run(&qc)?;
            let mut written = scratch.clone();
            written.extend_from_slice(&out);
            check_qubits_reset(&result, &written, None)?;
        }
    }
    Ok(())
}

#[test]
fn test_mcx_modes_flip_only_all_ones() -> Result<(), QcolorError> {
    for mode in [McxMode::Basic, McxMode::NoAncilla] {
        for n in 3..=5 {
            let mut qc = Circuit::new("mcx");
            let controls = qc.add_register("c", n).qubits();
            let target = qc.add_register("t", 1).qubits()[0];
            let ancillas = qc.add_register("a", mode.ancillas_required(n)).qubits();
            for q in &controls {
                qc.h(*q)?;
            }
            qc.append_block(&multi_controlled_not(&controls, target, &ancillas, mode)?)?;

            let result = Simulator::new().run(&qc)?;
            check_qubits_reset(&result, &ancillas, None)?;
            let mut observed = controls.clone();
            observed.push(target);
            let probs = result.probabilities(&observed)?;
            let uniform = 1.0 / (1 << n) as f64;
            assert_eq!(probs.len(), 1 << n, "{:?} n={}", mode, n);
            for value in 0..(1usize << n) {
                let mut expected: Vec<bool> = (0..n).map(|k| (value >> k) & 1 == 1).collect();
                expected.push(value == (1 << n) - 1);
                let p = probs.get(&bits(&expected)).copied().unwrap_or(0.0);
                assert!((p - uniform).abs() < TOL, "{:?} n={} value={} p={}", mode, n, value, p);
            }
        }
    }
    Ok(())
}

#[test]
fn test_no_ancilla_mcx_preserves_phases() -> Result<(), QcolorError> {
    // Applying the gate twice must undo it exactly, phases included.
    let mut qc = Circuit::new("mcx_twice");
    let controls = qc.add_register("c", 4).qubits();
    let target = qc.add_register("t", 1).qubits()[0];
    for q in &controls {
        qc.h(*q)?;
    }
    let block = multi_controlled_not(&controls, target, &[], McxMode::NoAncilla)?;
    qc.append_block(&block)?;
    qc.append_block(&block)?;
    for q in &controls {
        qc.h(*q)?;
    }
    let mut all = controls.clone();
    all.push(target);
    assert_eq!(certain_outcome(&qc, &all)?, bits(&[false; 5]));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_mcx_basic_matches_and(value in 0usize..64, n in 3usize..=6) {
        let value = value % (1 << n);
        let mut qc = Circuit::new("prop_mcx");
        let controls = qc.add_register("c", n).qubits();
        let target = qc.add_register("t", 1).qubits()[0];
        let ancillas = qc.add_register("a", n - 2).qubits();
        prepare(&mut qc, &controls, value).unwrap();
        qc.append_block(&multi_controlled_not(&controls, target, &ancillas, McxMode::Basic).unwrap()).unwrap();

        let mut observed = vec![target];
        observed.extend_from_slice(&ancillas);
        let mut expected = vec![value == (1 << n) - 1];
        expected.extend(std::iter::repeat(false).take(n - 2));
        prop_assert_eq!(certain_outcome(&qc, &observed).unwrap(), bits(&expected));
    }

    #[test]
    fn prop_or_accumulates(a: bool, b: bool, t: bool) {
        let mut qc = Circuit::new("prop_or");
        let q = qc.add_register("q", 3).qubits();
        prepare(&mut qc, &q, a as usize | (b as usize) << 1 | (t as usize) << 2).unwrap();
        qc.append_block(&or_gate(q[0], q[1], q[2]).unwrap()).unwrap();
        prop_assert_eq!(certain_outcome(&qc, &q).unwrap(), bits(&[a, b, t ^ (a || b)]));
    }
}
