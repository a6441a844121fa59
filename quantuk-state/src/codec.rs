//! Magnitude/phase snapshot of a register
//!
//! The snapshot is the only state that survives between stateless requests,
//! so restoring it is strict: a record that does not describe a unit-norm
//! register of the stated size is rejected rather than repaired.

use crate::error::{Result, StateError};
use crate::register::{norm, Register, MAX_QUBITS, NORM_TOLERANCE};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Serialized register state
///
/// ```json
/// {"n": 1, "magnitudes": [0.7071067811865476, 0.7071067811865476], "phasesRadians": [0.0, 1.5707963267948966]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Qubit count
    pub n: usize,
    /// `|amplitude[i]|`, length 2^n
    #[serde(alias = "amp")]
    pub magnitudes: Vec<f64>,
    /// `arg(amplitude[i])` in radians, length 2^n
    #[serde(alias = "phase")]
    pub phases_radians: Vec<f64>,
}

impl Snapshot {
    /// Capture the current amplitudes of `register`
    pub fn from_register(register: &Register) -> Self {
        let (magnitudes, phases_radians) = register
            .amplitudes()
            .iter()
            .map(|a| a.to_polar())
            .unzip();
        Self {
            n: register.num_qubits(),
            magnitudes,
            phases_radians,
        }
    }

    /// Rebuild the register this snapshot was taken from
    ///
    /// # Errors
    /// Returns [`StateError::CorruptSnapshot`] if `n` is 0 or too large, the
    /// two sequences are not both 2^n long, a magnitude is negative or not
    /// finite, or the norm deviates from 1 by more than the tolerance
    pub fn restore(&self) -> Result<Register> {
        if self.n == 0 || self.n > MAX_QUBITS {
            return Err(StateError::CorruptSnapshot(format!(
                "qubit count {} outside 1..={}",
                self.n, MAX_QUBITS
            )));
        }

        let dimension = 1usize << self.n;
        if self.magnitudes.len() != dimension || self.phases_radians.len() != dimension {
            return Err(StateError::CorruptSnapshot(format!(
                "expected {} magnitudes and phases, got {} and {}",
                dimension,
                self.magnitudes.len(),
                self.phases_radians.len()
            )));
        }

        if let Some(i) = self
            .magnitudes
            .iter()
            .chain(self.phases_radians.iter())
            .position(|x| !x.is_finite())
        {
            return Err(StateError::CorruptSnapshot(format!(
                "non-finite value at position {}",
                i % dimension
            )));
        }
        if let Some(i) = self.magnitudes.iter().position(|&m| m < 0.0) {
            return Err(StateError::CorruptSnapshot(format!(
                "negative magnitude at index {}",
                i
            )));
        }

        let amplitudes: Vec<Complex64> = self
            .magnitudes
            .iter()
            .zip(self.phases_radians.iter())
            .map(|(&m, &phi)| Complex64::from_polar(m, phi))
            .collect();

        let norm = norm(&amplitudes);
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(StateError::CorruptSnapshot(format!(
                "norm {} is not 1",
                norm
            )));
        }

        Register::from_raw_amplitudes(self.n, amplitudes)
    }

    /// Born-rule probabilities `magnitude[i]²`
    pub fn probabilities(&self) -> Vec<f64> {
        self.magnitudes.iter().map(|m| m * m).collect()
    }

    /// n-digit binary label of every basis state, in index order
    pub fn basis_labels(&self) -> Vec<String> {
        (0..self.magnitudes.len())
            .map(|i| format!("{:0width$b}", i, width = self.n))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| StateError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StateError::Json(e.to_string()))
    }
}

impl Register {
    /// Export the register as a [`Snapshot`]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_register(self)
    }

    /// Rebuild a register from a [`Snapshot`]
    pub fn restore(snapshot: &Snapshot) -> Result<Self> {
        snapshot.restore()
    }
}

impl From<&Register> for Snapshot {
    fn from(register: &Register) -> Self {
        Snapshot::from_register(register)
    }
}
