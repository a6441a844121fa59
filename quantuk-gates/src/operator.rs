//! Full-register operator construction from per-qubit factors
//!
//! Qubits are numbered `1..=n`. Qubit `q` occupies tensor-factor position
//! `n - q` counted from the most significant side, so qubit 1 is the last
//! factor and owns bit 0 of the basis index, and qubit `n` owns bit `n - 1`.
//!
//! Every builder validates its operands before allocating anything.

use crate::error::{GateError, Result};
use crate::matrices::{self, Matrix2};
use crate::matrix_ops::{kron_chain, Operator};
use smallvec::SmallVec;

/// Per-qubit factor list for one tensor-product term
///
/// Starts as identity on every qubit; builders overwrite only the positions
/// they touch and reuse the list between branches.
#[derive(Clone, Debug, PartialEq)]
pub struct FactorList {
    factors: SmallVec<[Matrix2; 8]>,
}

impl FactorList {
    /// Identity on all `num_qubits` positions
    pub fn identity(num_qubits: usize) -> Self {
        Self::uniform(&matrices::IDENTITY, num_qubits)
    }

    /// The same factor on every position
    pub fn uniform(factor: &Matrix2, num_qubits: usize) -> Self {
        Self {
            factors: SmallVec::from_elem(*factor, num_qubits),
        }
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.factors.len()
    }

    /// Factors in tensor order (most significant first)
    #[inline]
    pub fn factors(&self) -> &[Matrix2] {
        &self.factors
    }

    /// Tensor-factor position of a 1-based qubit number
    pub fn position(&self, qubit: usize) -> Result<usize> {
        check_qubit(qubit, self.num_qubits())?;
        Ok(self.num_qubits() - qubit)
    }

    /// Place `factor` on `qubit`
    pub fn set(&mut self, qubit: usize, factor: Matrix2) -> Result<()> {
        let pos = self.position(qubit)?;
        self.factors[pos] = factor;
        Ok(())
    }

    /// Iterated tensor product of the list
    pub fn tensor(&self) -> Operator {
        kron_chain(&self.factors)
    }
}

#[inline]
fn check_qubit(qubit: usize, num_qubits: usize) -> Result<()> {
    if qubit == 0 || qubit > num_qubits {
        return Err(GateError::invalid_qubit(qubit, num_qubits));
    }
    Ok(())
}

/// Check that every qubit lies in `1..=num_qubits` and none repeats
pub fn validate_qubits(qubits: &[usize], num_qubits: usize) -> Result<()> {
    for (i, &q) in qubits.iter().enumerate() {
        check_qubit(q, num_qubits)?;
        if qubits[..i].contains(&q) {
            return Err(GateError::DuplicateQubit(q));
        }
    }
    Ok(())
}

/// Embed a single-qubit gate into an `num_qubits` register
///
/// With an empty `qubits` slice the gate acts on every qubit (`G^{⊗n}`);
/// otherwise it acts on each listed qubit with identity elsewhere.
///
/// # Example
/// ```
/// use quantuk_gates::matrices::PAULI_X;
/// use quantuk_gates::operator::embed_single_qubit_gate;
///
/// // X on qubit 1 of a 2-qubit register flips bit 0 of the basis index
/// let op = embed_single_qubit_gate(&PAULI_X, 2, &[1]).unwrap();
/// assert_eq!(op.get(1, 0).re, 1.0);
/// ```
pub fn embed_single_qubit_gate(
    gate: &Matrix2,
    num_qubits: usize,
    qubits: &[usize],
) -> Result<Operator> {
    if qubits.is_empty() {
        return Ok(FactorList::uniform(gate, num_qubits).tensor());
    }

    validate_qubits(qubits, num_qubits)?;

    let mut factors = FactorList::identity(num_qubits);
    for &q in qubits {
        factors.set(q, *gate)?;
    }
    Ok(factors.tensor())
}

/// Embed a controlled gate: `gate` on `target` iff every control reads 1
///
/// Built as the sum of two tensor-product branches over one shared factor
/// list. With `P1` on every control:
///
/// - fired branch: `P1 ⊗ … ⊗ gate(target)`
/// - idle branch: `I − (P1 ⊗ … ⊗ I(target))`
///
/// For a single control the idle branch equals `P0 ⊗ I`. For several
/// controls it covers every control pattern other than all-ones, which keeps
/// the operator unitary.
pub fn embed_controlled_gate(
    gate: &Matrix2,
    num_qubits: usize,
    controls: &[usize],
    target: usize,
) -> Result<Operator> {
    if controls.is_empty() {
        return Err(GateError::EmptyQubitList);
    }
    validate_qubits(controls, num_qubits)?;
    check_qubit(target, num_qubits)?;
    if controls.contains(&target) {
        return Err(GateError::ControlTargetCollision(target));
    }

    let mut factors = FactorList::identity(num_qubits);

    if let [control] = controls {
        factors.set(*control, matrices::PROJECTOR_ZERO)?;
        let idle = factors.tensor();

        factors.set(*control, matrices::PROJECTOR_ONE)?;
        factors.set(target, *gate)?;
        let fired = factors.tensor();

        return idle.add(&fired);
    }

    for &c in controls {
        factors.set(c, matrices::PROJECTOR_ONE)?;
    }
    let all_ones = factors.tensor();

    factors.set(target, *gate)?;
    let fired = factors.tensor();

    let identity = Operator::identity(1 << num_qubits);
    identity.sub(&all_ones)?.add(&fired)
}

/// Projector onto `outcome` (0 or 1) on `qubit`, identity elsewhere
pub fn embed_projector(outcome: u8, num_qubits: usize, qubit: usize) -> Result<Operator> {
    let mut factors = FactorList::identity(num_qubits);
    factors.set(qubit, matrices::projector(outcome))?;
    Ok(factors.tensor())
}
