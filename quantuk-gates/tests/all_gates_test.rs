//! Every gate family embedded at every position of small registers

use approx::assert_relative_eq;
use num_complex::Complex64;
use quantuk_gates::matrix_ops::kron_chain;
use quantuk_gates::matrices::{self, IDENTITY};
use quantuk_gates::{
    embed_controlled_gate, embed_projector, embed_single_qubit_gate, Angle, Gate, GateError,
    Operator,
};

const EPSILON: f64 = 1e-10;

fn gate_families() -> Vec<Gate> {
    let mut gates = vec![
        Gate::Identity,
        Gate::Hadamard,
        Gate::PauliX,
        Gate::PauliY,
        Gate::PauliZ,
        Gate::SqrtX,
        Gate::SqrtZ,
    ];
    for degrees in [-270.0, -45.0, 0.0, 30.0, 90.0, 180.0, 359.0] {
        let angle = Angle::from_degrees(degrees);
        gates.extend([
            Gate::Phase(angle),
            Gate::Rx(angle),
            Gate::Ry(angle),
            Gate::Rz(angle),
            Gate::GlobalPhase(angle),
        ]);
    }
    gates
}

fn assert_operators_eq(a: &Operator, b: &Operator) {
    assert_eq!(a.dimension(), b.dimension());
    for (x, y) in a.data().iter().zip(b.data()) {
        assert_relative_eq!((x - y).norm(), 0.0, epsilon = EPSILON);
    }
}

#[test]
fn single_qubit_embeddings_are_unitary() {
    for gate in gate_families() {
        let m = gate.matrix();
        for n in 1..=4 {
            for q in 1..=n {
                let op = embed_single_qubit_gate(&m, n, &[q]).unwrap();
                assert!(op.is_unitary(EPSILON), "{} on qubit {} of {}", gate, q, n);
            }
            let all = embed_single_qubit_gate(&m, n, &[]).unwrap();
            assert!(all.is_unitary(EPSILON), "{} on all {} qubits", gate, n);
        }
    }
}

#[test]
fn controlled_embeddings_are_unitary() {
    for gate in gate_families() {
        let m = gate.matrix();
        for n in 2..=4 {
            for target in 1..=n {
                for control in (1..=n).filter(|&c| c != target) {
                    let op = embed_controlled_gate(&m, n, &[control], target).unwrap();
                    assert!(op.is_unitary(EPSILON), "c-{} {}→{}", gate, control, target);
                }
                let controls: Vec<usize> = (1..=n).filter(|&c| c != target).collect();
                let op = embed_controlled_gate(&m, n, &controls, target).unwrap();
                assert!(op.is_unitary(EPSILON), "multi-controlled {}", gate);
            }
        }
    }
}

#[test]
fn empty_target_list_equals_explicit_list() {
    for gate in gate_families() {
        let m = gate.matrix();
        let implicit = embed_single_qubit_gate(&m, 3, &[]).unwrap();
        let explicit = embed_single_qubit_gate(&m, 3, &[1, 2, 3]).unwrap();
        assert_operators_eq(&implicit, &explicit);
    }
}

#[test]
fn qubit_one_is_least_significant_factor() {
    // X on qubit 1 of 3 = I ⊗ I ⊗ X
    let op = embed_single_qubit_gate(&matrices::PAULI_X, 3, &[1]).unwrap();
    let expected = kron_chain(&[IDENTITY, IDENTITY, matrices::PAULI_X]);
    assert_operators_eq(&op, &expected);

    // X on qubit 3 of 3 = X ⊗ I ⊗ I
    let op = embed_single_qubit_gate(&matrices::PAULI_X, 3, &[3]).unwrap();
    let expected = kron_chain(&[matrices::PAULI_X, IDENTITY, IDENTITY]);
    assert_operators_eq(&op, &expected);
}

#[test]
fn single_control_matches_projector_sum() {
    let h = Gate::Hadamard.matrix();
    let op = embed_controlled_gate(&h, 2, &[2], 1).unwrap();

    let idle = kron_chain(&[matrices::PROJECTOR_ZERO, IDENTITY]);
    let fired = kron_chain(&[matrices::PROJECTOR_ONE, h]);
    assert_operators_eq(&op, &idle.add(&fired).unwrap());
}

#[test]
fn projectors_partition_identity() {
    for n in 1..=4 {
        for q in 1..=n {
            let p0 = embed_projector(0, n, q).unwrap();
            let p1 = embed_projector(1, n, q).unwrap();
            assert_operators_eq(&p0.add(&p1).unwrap(), &Operator::identity(1 << n));
            assert_operators_eq(&p0.matmul(&p0).unwrap(), &p0);
        }
    }
}

#[test]
fn operand_errors_are_reported() {
    let x = matrices::PAULI_X;
    assert_eq!(
        embed_single_qubit_gate(&x, 2, &[0]).unwrap_err(),
        GateError::invalid_qubit(0, 2)
    );
    assert_eq!(
        embed_single_qubit_gate(&x, 2, &[3]).unwrap_err(),
        GateError::invalid_qubit(3, 2)
    );
    assert_eq!(
        embed_single_qubit_gate(&x, 3, &[1, 2, 1]).unwrap_err(),
        GateError::DuplicateQubit(1)
    );
    assert_eq!(
        embed_controlled_gate(&x, 3, &[2], 2).unwrap_err(),
        GateError::ControlTargetCollision(2)
    );
    assert_eq!(
        embed_controlled_gate(&x, 3, &[], 2).unwrap_err(),
        GateError::EmptyQubitList
    );
}

#[test]
fn global_phase_gate_scales_register() {
    let phi = 0.7;
    let op = embed_single_qubit_gate(&matrices::global_phase(phi), 3, &[1]).unwrap();
    let scale = Complex64::from_polar(1.0, phi);
    for r in 0..8 {
        for c in 0..8 {
            let expected = if r == c { scale } else { Complex64::new(0.0, 0.0) };
            assert_relative_eq!((op.get(r, c) - expected).norm(), 0.0, epsilon = EPSILON);
        }
    }
}
