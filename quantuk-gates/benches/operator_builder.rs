use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;
use quantuk_gates::matrices::{HADAMARD, PAULI_X};
use quantuk_gates::operator::{embed_controlled_gate, embed_single_qubit_gate};

fn bench_single_qubit_embedding(c: &mut Criterion) {
    let mut group = c.benchmark_group("embed_single_qubit_gate");

    for num_qubits in [2, 4, 6, 8].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_qubits", num_qubits)),
            num_qubits,
            |b, &num_qubits| {
                b.iter(|| embed_single_qubit_gate(black_box(&HADAMARD), num_qubits, &[1]).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_controlled_embedding(c: &mut Criterion) {
    let mut group = c.benchmark_group("embed_controlled_gate");

    for num_qubits in [3, 5, 7].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_qubits", num_qubits)),
            num_qubits,
            |b, &num_qubits| {
                b.iter(|| {
                    embed_controlled_gate(black_box(&PAULI_X), num_qubits, &[1, 2], num_qubits)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("operator_apply");

    for num_qubits in [4, 6, 8, 10].iter() {
        let op = embed_single_qubit_gate(&HADAMARD, *num_qubits, &[]).unwrap();
        let mut state = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        state[0] = Complex64::new(1.0, 0.0);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_qubits", num_qubits)),
            num_qubits,
            |b, _| {
                b.iter(|| op.apply(black_box(&state)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_qubit_embedding,
    bench_controlled_embedding,
    bench_apply
);
criterion_main!(benches);
