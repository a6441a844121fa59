//! End-to-end sessions: prepare, apply, measure, snapshot, restore

use approx::assert_relative_eq;
use quantuk_sim::{
    Angle, Basis, Gate, Instruction, Outcome, Reading, Simulator, SimulatorConfig, Snapshot,
};

fn session(n: usize, seed: u64) -> Simulator {
    Simulator::with_config(n, SimulatorConfig::deterministic(seed)).unwrap()
}

/// Index of the basis state the register is certainly in
fn certain_index(sim: &Simulator) -> usize {
    let probs = sim.register().probabilities();
    let index = probs
        .iter()
        .position(|&p| (p - 1.0).abs() < 1e-9)
        .expect("register is not in a basis state");
    index
}

#[test]
fn swap_moves_written_bit() {
    // |10⟩ (qubit 1 set) becomes |01⟩ (qubit 2 set)
    let mut sim = session(2, 1);
    sim.write(1, 1).unwrap();
    assert_eq!(certain_index(&sim), 0b01);
    sim.swap(1, 2).unwrap();
    assert_eq!(certain_index(&sim), 0b10);
}

#[test]
fn cnot_on_control_set_and_clear() {
    let mut sim = session(2, 1);
    sim.write(1, 1).unwrap();
    sim.cnot(1, 2).unwrap();
    assert_eq!(certain_index(&sim), 0b11);

    let mut sim = session(2, 1);
    sim.cnot(1, 2).unwrap();
    assert_eq!(certain_index(&sim), 0);
}

#[test]
fn pauli_x_and_hadamard_are_self_inverse() {
    let mut sim = session(3, 2);
    sim.write_probabilities(&[0.2, 0.5, 0.9]).unwrap();
    sim.crx(1, 3, 33).unwrap();
    let before = sim.register().amplitudes().to_vec();

    for q in 1..=3 {
        sim.x(&[q]).unwrap();
        sim.x(&[q]).unwrap();
        sim.had(&[q]).unwrap();
        sim.had(&[q]).unwrap();
    }

    for (a, b) in sim.register().amplitudes().iter().zip(before.iter()) {
        assert_relative_eq!((a - b).norm(), 0.0, epsilon = 1e-10);
    }
}

#[test]
fn request_cycle_preserves_state() {
    let mut first = session(3, 3);
    first.had(&[]).unwrap();
    first.cphase(1, 3, 90).unwrap();
    first.ry(40, &[2]).unwrap();
    let json = first.to_json().unwrap();

    // next request
    let mut second = Simulator::from_json(&json, SimulatorConfig::deterministic(3)).unwrap();
    for (a, b) in first
        .register()
        .amplitudes()
        .iter()
        .zip(second.register().amplitudes())
    {
        assert_relative_eq!((a - b).norm(), 0.0, epsilon = 1e-6);
    }

    second.set_global_phase0().unwrap();
    assert_eq!(second.register().amplitudes()[0].im, 0.0);
    let snapshot: Snapshot = serde_json::from_str(&second.to_json().unwrap()).unwrap();
    assert_eq!(snapshot.n, 3);
}

#[test]
fn full_measurement_of_basis_state_is_stable() {
    let mut sim = session(4, 4);
    sim.write(11, 1).unwrap();
    for _ in 0..5 {
        match sim.read(None, Basis::Computational).unwrap() {
            Reading::Register(r) => {
                assert_eq!(r.value, 11);
                assert_eq!(r.bits, "1011");
                assert_relative_eq!(r.probability, 1.0, epsilon = 1e-12);
            }
            Reading::Qubit(_) => panic!("expected a register reading"),
        }
    }
    assert_eq!(certain_index(&sim), 11);
}

#[test]
fn measurement_collapses_entangled_partner() {
    for seed in 0..10 {
        let mut sim = session(2, seed);
        sim.had(&[1]).unwrap();
        sim.cnot(1, 2).unwrap();

        let first = match sim.read(Some(1), Basis::Computational).unwrap() {
            Reading::Qubit(r) => r,
            Reading::Register(_) => unreachable!(),
        };
        assert_relative_eq!(first.p0, 0.5, epsilon = 1e-6);

        let second = match sim.read(Some(2), Basis::Computational).unwrap() {
            Reading::Qubit(r) => r,
            Reading::Register(_) => unreachable!(),
        };
        assert_eq!(first.outcome, second.outcome);
    }
}

#[test]
fn toffoli_truth_table() {
    for input in 0..8 {
        let mut sim = session(3, 0);
        sim.write(input, 1).unwrap();
        let op = sim.ccnot(1, 2, 3).unwrap();
        assert!(op.is_unitary(1e-10));

        let expected = if input & 0b011 == 0b011 {
            input ^ 0b100
        } else {
            input
        };
        assert_eq!(certain_index(&sim), expected, "input {:03b}", input);
    }
}

#[test]
fn instruction_program_from_form_requests() {
    let requests: [(&str, &[usize], Option<f64>); 5] = [
        ("write", &[0], None),
        ("had", &[1], None),
        ("cnot", &[1, 2], None),
        ("cphase", &[2, 3], Some(180.0)),
        ("read", &[], None),
    ];

    let mut sim = session(3, 8);
    let mut last = None;
    for (name, operands, angle) in requests {
        let ins = Instruction::from_request(name, operands, angle.map(Angle::from_degrees)).unwrap();
        last = Some(sim.execute(&ins).unwrap());
    }

    match last {
        Some(Outcome::Measured(Reading::Register(r))) => {
            // Bell pair on qubits 1 and 2, qubit 3 untouched
            assert!(r.value == 0 || r.value == 0b011, "got {:03b}", r.value);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn write_overrides_whatever_the_register_held() {
    let mut sim = session(2, 4);
    sim.write(3, 1).unwrap();
    sim.x(&[]).unwrap();
    let write_zero = Instruction::from_request("write", &[0], None).unwrap();
    sim.execute(&write_zero).unwrap();
    assert_eq!(certain_index(&sim), 0);

    sim.write_probabilities(&[0.5, 0.5]).unwrap();
    sim.execute(&Instruction::Write { value: 1, start: 1 }).unwrap();
    assert_eq!(certain_index(&sim), 1);
}

#[test]
fn gate_entry_points_return_applied_operator() {
    let mut sim = session(2, 0);
    let op = sim.apply(&Gate::Rz(Angle::from_degrees(90.0)), &[2]).unwrap();
    assert_eq!(op.dimension(), 4);
    assert!(op.is_unitary(1e-10));

    let swap = sim.swap(1, 2).unwrap();
    assert!(swap.is_unitary(1e-10));
}
