//! Projective measurement with Born-rule sampling and collapse
//!
//! Two measurements are provided:
//! - [`FullRegister`]: samples one basis state of the whole register and
//!   collapses onto it
//! - [`SingleQubit`]: projects one qubit onto |0⟩ or |1⟩ and renormalizes,
//!   leaving the remaining qubits consistent with the outcome
//!
//! Both accept a [`Basis`]; a non-computational basis is applied as a
//! rotation before projecting, which turns the projective measurement into
//! a POVM in that basis.

use crate::error::{Result, StateError};
use crate::register::{Register, NORM_TOLERANCE};
use num_complex::Complex64;
use quantuk_gates::{embed_projector, embed_single_qubit_gate, matrices, Matrix2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Measurement basis
///
/// Serialized as `"computational"`, `"x"`, `"y"`, `"z"`, `"hadamard"`, or
/// `{"custom": [[re, im], ...]}` with the 2×2 rotation in row-major order.
/// The short labels `"c"` and `"h"` are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Computational (Z eigenbasis), no rotation
    #[default]
    #[serde(alias = "c")]
    Computational,
    /// Rotate with Pauli-X before projecting
    X,
    /// Rotate with Pauli-Y before projecting
    Y,
    /// Rotate with Pauli-Z before projecting
    Z,
    /// Rotate with Hadamard before projecting
    #[serde(alias = "h")]
    Hadamard,
    /// Caller-supplied rotation, applied without a unitarity check
    Custom(Matrix2),
}

impl Basis {
    /// Rotation applied before projecting, `None` for the computational basis
    pub fn rotation(&self) -> Option<Matrix2> {
        match self {
            Basis::Computational => None,
            Basis::X => Some(matrices::PAULI_X),
            Basis::Y => Some(matrices::PAULI_Y),
            Basis::Z => Some(matrices::PAULI_Z),
            Basis::Hadamard => Some(matrices::HADAMARD),
            Basis::Custom(m) => Some(*m),
        }
    }
}

impl FromStr for Basis {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "computational" => Ok(Basis::Computational),
            "x" => Ok(Basis::X),
            "y" => Ok(Basis::Y),
            "z" => Ok(Basis::Z),
            "h" | "hadamard" => Ok(Basis::Hadamard),
            _ => Err(StateError::UnknownBasis(s.to_string())),
        }
    }
}

/// Trait for measurements on a register
pub trait Measurement {
    /// Outcome report
    type Output;

    /// Measure `register`, collapsing it according to the outcome
    ///
    /// `rng` must return uniform samples from [0, 1).
    fn measure(&self, register: &mut Register, rng: &mut dyn FnMut() -> f64)
        -> Result<Self::Output>;
}

/// Outcome of a full-register measurement
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterReading {
    /// Sampled basis-state index
    pub value: usize,
    /// `value` in binary, padded to n digits
    pub bits: String,
    /// Probability the outcome had before collapse
    pub probability: f64,
}

impl RegisterReading {
    /// Value read on `qubit` (1-indexed)
    pub fn qubit(&self, qubit: usize) -> u8 {
        ((self.value >> (qubit - 1)) & 1) as u8
    }
}

impl fmt::Display for RegisterReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Measured state |{}>.", self.bits)
    }
}

/// Outcome of a single-qubit measurement
#[derive(Debug, Clone, PartialEq)]
pub struct QubitReading {
    pub qubit: usize,
    /// 0 or 1
    pub outcome: u8,
    /// Probability of reading 0 before collapse
    pub p0: f64,
    /// Probability of reading 1 before collapse
    pub p1: f64,
}

impl fmt::Display for QubitReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Measurement Q-bit {:2}: |{}> \t (|0>: {:.2}% |1>: {:.2}%).",
            self.qubit,
            self.outcome,
            self.p0 * 100.0,
            self.p1 * 100.0
        )
    }
}

/// Measure every qubit at once
#[derive(Debug, Clone, Copy, Default)]
pub struct FullRegister {
    pub basis: Basis,
}

impl FullRegister {
    pub fn new(basis: Basis) -> Self {
        Self { basis }
    }
}

impl Measurement for FullRegister {
    type Output = RegisterReading;

    fn measure(
        &self,
        register: &mut Register,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<RegisterReading> {
        let n = register.num_qubits();

        let probabilities: Vec<f64> = match self.basis.rotation() {
            Some(rotation) => {
                let op = embed_single_qubit_gate(&rotation, n, &[])?;
                op.apply(register.amplitudes())?
                    .iter()
                    .map(|a| a.norm_sqr())
                    .collect()
            }
            None => register.probabilities(),
        };

        let value = sample_index(&probabilities, rng());
        register.collapse_to(value);

        let reading = RegisterReading {
            value,
            bits: format!("{:0width$b}", value, width = n),
            probability: probabilities[value],
        };
        info!(basis = ?self.basis, value, probability = reading.probability, "{}", reading);
        Ok(reading)
    }
}

/// Measure one qubit, leaving the others unmeasured
#[derive(Debug, Clone, Copy)]
pub struct SingleQubit {
    /// 1-indexed qubit to measure
    pub qubit: usize,
    pub basis: Basis,
}

impl SingleQubit {
    pub fn new(qubit: usize, basis: Basis) -> Self {
        Self { qubit, basis }
    }
}

impl Measurement for SingleQubit {
    type Output = QubitReading;

    fn measure(
        &self,
        register: &mut Register,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<QubitReading> {
        let n = register.num_qubits();
        let qubit = self.qubit;

        let project_zero = embed_projector(0, n, qubit)?;
        let project_one = embed_projector(1, n, qubit)?;

        let rotated = match self.basis.rotation() {
            Some(rotation) => {
                embed_single_qubit_gate(&rotation, n, &[qubit])?.apply(register.amplitudes())?
            }
            None => register.amplitudes().to_vec(),
        };

        let state0 = project_zero.apply(&rotated)?;
        let state1 = project_one.apply(&rotated)?;
        let p0 = squared_norm(&state0);
        let p1 = squared_norm(&state1);

        if (p0 + p1 - 1.0).abs() > NORM_TOLERANCE {
            return Err(StateError::InvariantViolation { qubit, p0, p1 });
        }

        let r = rng();
        let outcome: u8 = if (r < p0 && p0 > 0.0) || p1 == 0.0 { 0 } else { 1 };
        let (chosen, p) = if outcome == 0 { (state0, p0) } else { (state1, p1) };

        let scale = p.sqrt();
        register.replace_amplitudes(chosen.into_iter().map(|a| a / scale).collect());

        let reading = QubitReading {
            qubit,
            outcome,
            p0,
            p1,
        };
        debug!(r, "sampled single-qubit outcome");
        info!(basis = ?self.basis, qubit, outcome, p0, p1, "{}", reading);
        Ok(reading)
    }
}

impl Register {
    /// Measure the whole register in `basis`
    ///
    /// The register collapses onto the sampled basis state, exactly as if
    /// that index had been written with [`write_index`](Register::write_index).
    pub fn measure_all(
        &mut self,
        basis: Basis,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<RegisterReading> {
        FullRegister::new(basis).measure(self, rng)
    }

    /// Measure `qubit` in `basis`
    ///
    /// # Errors
    /// Returns a domain error for an invalid qubit, and
    /// [`StateError::InvariantViolation`] if the branch probabilities do not
    /// sum to one. The register is unchanged in both cases.
    pub fn measure_qubit(
        &mut self,
        qubit: usize,
        basis: Basis,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<QubitReading> {
        SingleQubit::new(qubit, basis).measure(self, rng)
    }
}

fn squared_norm(v: &[Complex64]) -> f64 {
    v.iter().map(|a| a.norm_sqr()).sum()
}

/// Pick the first index whose cumulative probability exceeds `r`
///
/// Falls back to the last index with non-zero probability when rounding
/// leaves the total just below `r`.
fn sample_index(probabilities: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r < cumulative && p > 0.0 {
            return i;
        }
    }
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len() - 1)
}
