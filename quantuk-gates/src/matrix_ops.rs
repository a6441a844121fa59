//! Dense full-register operators
//!
//! An [`Operator`] is a square complex matrix stored as a flattened row-major
//! vector. This module provides the linear algebra the operator builder and
//! the register need:
//! - Tensor (Kronecker) products, pairwise and over a factor list
//! - Sum, product and adjoint
//! - Matrix-vector application against a state vector
//! - Unitarity check
//!
//! # Example
//!
//! ```rust
//! use quantuk_gates::matrices::{IDENTITY, PAULI_X};
//! use quantuk_gates::matrix_ops::kron_chain;
//!
//! // X on the least significant factor of a 2-qubit system
//! let op = kron_chain(&[IDENTITY, PAULI_X]);
//! assert_eq!(op.dimension(), 4);
//! assert!(op.is_unitary(1e-10));
//! ```

use crate::error::{GateError, Result};
use crate::matrices::Matrix2;
use num_complex::Complex64;

/// Number of qubits from which [`Operator::apply`] evaluates rows in parallel
#[cfg(feature = "parallel")]
pub const PARALLEL_QUBIT_THRESHOLD: usize = 7;

/// Square complex matrix in row-major order
#[derive(Clone, Debug, PartialEq)]
pub struct Operator {
    dimension: usize,
    data: Vec<Complex64>,
}

impl Operator {
    /// Identity of the given dimension
    pub fn identity(dimension: usize) -> Self {
        let mut data = vec![Complex64::new(0.0, 0.0); dimension * dimension];
        for i in 0..dimension {
            data[i * dimension + i] = Complex64::new(1.0, 0.0);
        }
        Self { dimension, data }
    }

    /// Operator from a 2×2 matrix
    pub fn from_matrix2(matrix: &Matrix2) -> Self {
        Self {
            dimension: 2,
            data: matrix.iter().flatten().copied().collect(),
        }
    }

    /// Matrix dimension (2^n for an n-qubit operator)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of qubits this operator acts on
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.dimension.trailing_zeros() as usize
    }

    /// Flattened row-major entries
    #[inline]
    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    /// Entry at `(row, col)`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dimension + col]
    }

    /// Tensor product `self ⊗ other`
    ///
    /// For A (m×m) and B (n×n) the result is (mn)×(mn), with A's indices
    /// occupying the most significant positions.
    pub fn kron(&self, other: &Operator) -> Operator {
        let n_a = self.dimension;
        let n_b = other.dimension;
        let n_result = n_a * n_b;
        let mut data = vec![Complex64::new(0.0, 0.0); n_result * n_result];

        for i in 0..n_a {
            for j in 0..n_a {
                let a_ij = self.data[i * n_a + j];
                if a_ij == Complex64::new(0.0, 0.0) {
                    continue;
                }
                for k in 0..n_b {
                    let row = (i * n_b + k) * n_result;
                    for l in 0..n_b {
                        data[row + j * n_b + l] = a_ij * other.data[k * n_b + l];
                    }
                }
            }
        }

        Operator {
            dimension: n_result,
            data,
        }
    }

    /// Matrix sum `self + other`
    pub fn add(&self, other: &Operator) -> Result<Operator> {
        self.check_same_dimension(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Operator {
            dimension: self.dimension,
            data,
        })
    }

    /// Matrix difference `self - other`
    pub fn sub(&self, other: &Operator) -> Result<Operator> {
        self.check_same_dimension(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        Ok(Operator {
            dimension: self.dimension,
            data,
        })
    }

    /// Matrix product `self · other` (other is applied first)
    pub fn matmul(&self, other: &Operator) -> Result<Operator> {
        self.check_same_dimension(other)?;
        let n = self.dimension;
        let mut data = vec![Complex64::new(0.0, 0.0); n * n];

        for i in 0..n {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                if a_ik == Complex64::new(0.0, 0.0) {
                    continue;
                }
                for j in 0..n {
                    data[i * n + j] += a_ik * other.data[k * n + j];
                }
            }
        }

        Ok(Operator { dimension: n, data })
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Operator {
        let n = self.dimension;
        let mut data = vec![Complex64::new(0.0, 0.0); n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = self.data[j * n + i].conj();
            }
        }
        Operator { dimension: n, data }
    }

    /// Check `U†U = I` within `tolerance` on every entry
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let Ok(product) = self.adjoint().matmul(self) else {
            return false;
        };
        let n = self.dimension;
        (0..n).all(|i| {
            (0..n).all(|j| {
                let expected = if i == j { 1.0 } else { 0.0 };
                (product.data[i * n + j] - Complex64::new(expected, 0.0)).norm() <= tolerance
            })
        })
    }

    /// Multiply this operator against a state vector
    ///
    /// With the `parallel` feature, rows are evaluated on the rayon pool once
    /// the operator spans [`PARALLEL_QUBIT_THRESHOLD`] qubits.
    ///
    /// # Errors
    /// Returns error if `state.len()` differs from the operator dimension
    pub fn apply(&self, state: &[Complex64]) -> Result<Vec<Complex64>> {
        if state.len() != self.dimension {
            return Err(GateError::DimensionMismatch {
                expected: self.dimension,
                actual: state.len(),
            });
        }

        #[cfg(feature = "parallel")]
        if self.num_qubits() >= PARALLEL_QUBIT_THRESHOLD {
            use rayon::prelude::*;
            return Ok(self
                .data
                .par_chunks(self.dimension)
                .map(|row| dot(row, state))
                .collect());
        }

        Ok(self
            .data
            .chunks(self.dimension)
            .map(|row| dot(row, state))
            .collect())
    }

    fn check_same_dimension(&self, other: &Operator) -> Result<()> {
        if self.dimension != other.dimension {
            return Err(GateError::DimensionMismatch {
                expected: self.dimension,
                actual: other.dimension,
            });
        }
        Ok(())
    }
}

#[inline]
fn dot(row: &[Complex64], state: &[Complex64]) -> Complex64 {
    row.iter().zip(state.iter()).map(|(a, b)| a * b).sum()
}

/// Iterated tensor product `f[0] ⊗ f[1] ⊗ … ⊗ f[n-1]`
///
/// `factors[0]` lands on the most significant bit of the basis index.
/// An empty list yields the 1×1 identity.
pub fn kron_chain(factors: &[Matrix2]) -> Operator {
    factors
        .iter()
        .fold(Operator::identity(1), |acc, factor| {
            acc.kron(&Operator::from_matrix2(factor))
        })
}
