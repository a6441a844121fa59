//! Dense amplitude vector of an n-qubit register
//!
//! Index `i` of the amplitude vector is the computational basis state whose
//! binary digits are the qubit values, with qubit 1 on bit 0 and qubit `n`
//! on bit `n - 1`.

use crate::error::{Result, StateError};
use num_complex::Complex64;
use quantuk_gates::{
    embed_controlled_gate, embed_single_qubit_gate, matrices, Gate, Matrix2, Operator,
};
use std::fmt;
use tracing::{debug, warn};

/// Tolerance for the unit-norm invariant
pub const NORM_TOLERANCE: f64 = 1e-6;

/// Largest register the dense representation accepts
///
/// Operators are 4^n entries; 12 qubits is already 256 MiB per operator.
pub const MAX_QUBITS: usize = 12;

/// Single-qubit state `[⟨0|ψ⟩, ⟨1|ψ⟩]`
type Ket = [Complex64; 2];

/// Report that a supplied amplitude vector was rescaled to unit norm
#[must_use = "a renormalized input should be surfaced to the caller"]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renormalization {
    /// Norm of the vector before rescaling
    pub norm: f64,
}

impl fmt::Display for Renormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The given amplitudes were not normalized (norm = {}); rescaled to unit norm",
            self.norm
        )
    }
}

/// An n-qubit register in dense representation
///
/// # Example
///
/// ```
/// use quantuk_state::Register;
///
/// let mut reg = Register::new(3).unwrap();
/// reg.write_index(0b101, 1).unwrap();
/// assert_eq!(reg.amplitudes()[5].re, 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Register {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl Register {
    /// Create a register with every qubit in |0⟩
    ///
    /// # Errors
    /// Returns error if `num_qubits` is 0 or above [`MAX_QUBITS`]
    pub fn new(num_qubits: usize) -> Result<Self> {
        check_qubit_count(num_qubits)?;
        Ok(Self {
            num_qubits,
            amplitudes: basis_state(1 << num_qubits, 0),
        })
    }

    /// Register holding `amplitudes` as-is, without renormalizing
    pub(crate) fn from_raw_amplitudes(num_qubits: usize, amplitudes: Vec<Complex64>) -> Result<Self> {
        check_qubit_count(num_qubits)?;
        let dimension = 1 << num_qubits;
        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^n)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// L2 norm of the amplitude vector
    pub fn norm(&self) -> f64 {
        norm(&self.amplitudes)
    }

    /// Check `|norm - 1| <= epsilon`
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() <= epsilon
    }

    /// Born-rule probabilities `|amplitude[i]|²`
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Reinitialize to |0…0⟩, optionally with a new qubit count
    ///
    /// # Errors
    /// Returns error if the new qubit count is invalid; the register is
    /// left untouched in that case
    pub fn reset(&mut self, num_qubits: Option<usize>) -> Result<()> {
        *self = Register::new(num_qubits.unwrap_or(self.num_qubits))?;
        Ok(())
    }

    /// Write `value` in binary starting at `start_qubit`
    ///
    /// The least significant digit of `value` goes to `start_qubit`, the
    /// next to `start_qubit + 1`, and so on. Every other qubit is set to
    /// |0⟩, whatever the register held before, so the result is always the
    /// basis state `value << (start_qubit - 1)`.
    ///
    /// # Errors
    /// Returns error if `start_qubit` is not in `1..=n` or `value` needs
    /// more than `n - start_qubit + 1` bits
    pub fn write_index(&mut self, value: usize, start_qubit: usize) -> Result<()> {
        if start_qubit == 0 || start_qubit > self.num_qubits {
            return Err(quantuk_gates::GateError::invalid_qubit(start_qubit, self.num_qubits).into());
        }
        let capacity = self.num_qubits - start_qubit + 1;
        if capacity < usize::BITS as usize && value >> capacity != 0 {
            return Err(StateError::ValueOutOfRange {
                value,
                start: start_qubit,
                capacity,
            });
        }

        self.collapse_to(value << (start_qubit - 1));
        Ok(())
    }

    /// Collapse onto the basis state `index`
    pub(crate) fn collapse_to(&mut self, index: usize) {
        debug_assert!(index < self.dimension());
        self.amplitudes = basis_state(self.dimension(), index);
    }

    /// Replace the amplitudes with an already normalized vector
    pub(crate) fn replace_amplitudes(&mut self, amplitudes: Vec<Complex64>) {
        debug_assert_eq!(amplitudes.len(), self.dimension());
        self.amplitudes = amplitudes;
    }

    /// Overwrite the register with explicit amplitudes
    ///
    /// A vector whose norm differs from 1 by more than [`NORM_TOLERANCE`] is
    /// rescaled; the returned [`Renormalization`] reports that.
    ///
    /// # Errors
    /// Returns error if the length is not 2^n or the vector is zero
    pub fn write_amplitudes(&mut self, amplitudes: &[Complex64]) -> Result<Option<Renormalization>> {
        if amplitudes.len() != self.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: amplitudes.len(),
            });
        }

        let norm = norm(amplitudes);
        if norm == 0.0 || !norm.is_finite() {
            return Err(StateError::ZeroNorm);
        }

        let report = if (norm - 1.0).abs() > NORM_TOLERANCE {
            warn!(norm, "amplitudes are not normalized, rescaling to unit norm");
            self.amplitudes = amplitudes.iter().map(|a| a / norm).collect();
            Some(Renormalization { norm })
        } else {
            self.amplitudes = amplitudes.to_vec();
            None
        };

        Ok(report)
    }

    /// Overwrite the register from magnitudes and phases in degrees,
    /// combined elementwise as `m · e^(iφ)`
    ///
    /// # Errors
    /// Same as [`write_amplitudes`](Register::write_amplitudes), plus a
    /// dimension error if the two slices differ in length
    pub fn write_magnitude_phase(
        &mut self,
        magnitudes: &[f64],
        phases_degrees: &[f64],
    ) -> Result<Option<Renormalization>> {
        if phases_degrees.len() != magnitudes.len() {
            return Err(StateError::DimensionMismatch {
                expected: magnitudes.len(),
                actual: phases_degrees.len(),
            });
        }

        let amplitudes: Vec<Complex64> = magnitudes
            .iter()
            .zip(phases_degrees.iter())
            .map(|(&m, &deg)| Complex64::from_polar(m, deg.to_radians()))
            .collect();

        self.write_amplitudes(&amplitudes)
    }

    /// Prepare each qubit independently as `√(1-p)|0⟩ + √p|1⟩`
    ///
    /// `probabilities[q - 1]` is the probability of reading 1 on qubit `q`.
    ///
    /// # Errors
    /// Returns error if the slice length is not n or a value lies outside
    /// [0, 1]
    pub fn write_probabilities(&mut self, probabilities: &[f64]) -> Result<()> {
        if probabilities.len() != self.num_qubits {
            return Err(StateError::DimensionMismatch {
                expected: self.num_qubits,
                actual: probabilities.len(),
            });
        }

        let kets = probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                if !(0.0..=1.0).contains(&p) {
                    return Err(StateError::InvalidProbability {
                        qubit: i + 1,
                        value: p,
                    });
                }
                Ok([
                    Complex64::new((1.0 - p).sqrt(), 0.0),
                    Complex64::new(p.sqrt(), 0.0),
                ])
            })
            .collect::<Result<Vec<Ket>>>()?;

        self.amplitudes = product_state(&kets);
        Ok(())
    }

    /// Multiply the register by a full-register operator
    ///
    /// # Errors
    /// Returns error if the operator dimension differs from 2^n
    pub fn apply(&mut self, operator: &Operator) -> Result<()> {
        self.amplitudes = operator.apply(&self.amplitudes)?;
        Ok(())
    }

    /// Apply `gate` to the listed qubits (every qubit when empty) and return
    /// the embedded operator
    pub fn apply_gate(&mut self, gate: &Gate, qubits: &[usize]) -> Result<Operator> {
        self.apply_matrix(&gate.matrix(), qubits)
    }

    /// Apply an arbitrary 2×2 matrix to the listed qubits (every qubit when
    /// empty) and return the embedded operator
    pub fn apply_matrix(&mut self, matrix: &Matrix2, qubits: &[usize]) -> Result<Operator> {
        let operator = embed_single_qubit_gate(matrix, self.num_qubits, qubits)?;
        debug!(?qubits, "applying single-qubit operator");
        self.apply(&operator)?;
        Ok(operator)
    }

    /// Apply `gate` to `target` conditioned on all `controls` reading 1 and
    /// return the embedded operator
    pub fn apply_controlled(
        &mut self,
        gate: &Gate,
        controls: &[usize],
        target: usize,
    ) -> Result<Operator> {
        let operator = embed_controlled_gate(&gate.matrix(), self.num_qubits, controls, target)?;
        debug!(gate = %gate, ?controls, target, "applying controlled operator");
        self.apply(&operator)?;
        Ok(operator)
    }

    /// Remove the global phase so that amplitude 0 becomes real and
    /// non-negative
    ///
    /// Applies the scalar phase `e^(-iφ₀)` to the whole register, where φ₀
    /// is the phase of amplitude 0. Measurement probabilities are unchanged.
    pub fn set_global_phase0(&mut self) -> Result<Operator> {
        let phase0 = self.amplitudes[0].arg();
        debug!(phase0, degrees = phase0.to_degrees(), "removing global phase");

        let operator = embed_single_qubit_gate(
            &matrices::global_phase(-phase0),
            self.num_qubits,
            &[1],
        )?;
        self.apply(&operator)?;
        // cancel rounding left by the rotation
        self.amplitudes[0] = Complex64::new(self.amplitudes[0].norm(), 0.0);
        Ok(operator)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.amplitudes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "|{:0width$b}⟩: {:.4} ∠ {:.1}°",
                i,
                a.norm(),
                a.arg().to_degrees(),
                width = self.num_qubits
            )?;
        }
        Ok(())
    }
}

fn check_qubit_count(num_qubits: usize) -> Result<()> {
    if num_qubits == 0 {
        return Err(StateError::InvalidQubitCount);
    }
    if num_qubits > MAX_QUBITS {
        return Err(StateError::TooManyQubits {
            num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

fn basis_state(dimension: usize, index: usize) -> Vec<Complex64> {
    let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];
    amplitudes[index] = Complex64::new(1.0, 0.0);
    amplitudes
}

pub(crate) fn norm(amplitudes: &[Complex64]) -> f64 {
    amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
}

/// Tensor product of per-qubit kets (index `q - 1` → bit `q - 1`)
fn product_state(kets: &[Ket]) -> Vec<Complex64> {
    (0..1usize << kets.len())
        .map(|index| {
            kets.iter()
                .enumerate()
                .map(|(bit, ket)| ket[(index >> bit) & 1])
                .product()
        })
        .collect()
}
