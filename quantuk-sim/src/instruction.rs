//! Requests a front end hands to the simulator
//!
//! An [`Instruction`] is either built directly, deserialized from JSON, or
//! resolved from a gate name plus operand list with
//! [`Instruction::from_request`], which follows the naming of the web forms
//! (`write`, `had`, `cnot`, `ccnot`, `cphase`, `swap`, `read`, ...).
//! Controlled gates take their operands as `controls..., target`; `cswap` as
//! `controls..., i, j`; `write` as `value` or `value, start`.

use quantuk_gates::{Angle, Complex64, Gate, GateError, Operator};
use quantuk_state::{Basis, Renormalization};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SimulatorError};
use crate::simulator::{Reading, Simulator};

/// One simulator request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Reset to |0…0⟩, optionally with a new qubit count
    Reset {
        #[serde(default)]
        num_qubits: Option<usize>,
    },
    /// Write an integer in binary starting at `start`
    Write {
        value: usize,
        #[serde(default = "first_qubit")]
        start: usize,
    },
    /// Overwrite the register with explicit amplitudes, each as `[re, im]`
    WriteAmplitudes { amplitudes: Vec<Complex64> },
    /// Overwrite the register from magnitudes and phases in degrees
    WriteMagnitudePhase {
        magnitudes: Vec<f64>,
        phases_degrees: Vec<f64>,
    },
    /// Prepare each qubit with its probability of reading 1
    WriteProbabilities { probabilities: Vec<f64> },
    /// Single-qubit gate on the listed qubits (all when empty)
    Apply {
        gate: Gate,
        #[serde(default)]
        qubits: Vec<usize>,
    },
    /// Gate on `target` conditioned on every control reading 1
    Controlled {
        gate: Gate,
        controls: Vec<usize>,
        target: usize,
    },
    /// Exchange two qubits, conditioned on `controls` when non-empty
    Swap {
        #[serde(default)]
        controls: Vec<usize>,
        i: usize,
        j: usize,
    },
    /// Measure one qubit, or the whole register
    Read {
        #[serde(default)]
        qubit: Option<usize>,
        #[serde(default)]
        basis: Basis,
    },
    /// Make amplitude 0 real and non-negative
    SetGlobalPhase0,
}

fn first_qubit() -> usize {
    1
}

/// Result of [`Simulator::execute`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The register was (re)prepared; carries the rescaling report when
    /// written amplitudes had to be renormalized
    Prepared(Option<Renormalization>),
    /// An operator was applied; carries the full-register matrix
    Applied(Operator),
    /// A measurement was taken
    Measured(Reading),
}

impl Instruction {
    /// Resolve a front-end request keyed by name
    ///
    /// `angle` is in degrees and only consulted by parameterized gates.
    ///
    /// # Errors
    /// Returns error for an unknown name, a missing angle, or the wrong
    /// number of operands
    ///
    /// # Example
    /// ```
    /// use quantuk_gates::{Angle, Gate};
    /// use quantuk_sim::Instruction;
    ///
    /// let ins = Instruction::from_request("crx", &[1, 2], Some(Angle::from_degrees(90.0))).unwrap();
    /// assert_eq!(
    ///     ins,
    ///     Instruction::Controlled {
    ///         gate: Gate::Rx(Angle::from_degrees(90.0)),
    ///         controls: vec![1],
    ///         target: 2,
    ///     }
    /// );
    /// ```
    pub fn from_request(name: &str, operands: &[usize], angle: Option<Angle>) -> Result<Self> {
        let key = name.trim().to_ascii_lowercase();

        match key.as_str() {
            "reset" => {
                return match operands {
                    [] => Ok(Instruction::Reset { num_qubits: None }),
                    [n] => Ok(Instruction::Reset {
                        num_qubits: Some(*n),
                    }),
                    _ => Err(operand_count(name, "0 or 1", operands.len())),
                }
            }
            "write" => {
                return match operands {
                    [value] => Ok(Instruction::Write {
                        value: *value,
                        start: first_qubit(),
                    }),
                    [value, start] => Ok(Instruction::Write {
                        value: *value,
                        start: *start,
                    }),
                    _ => Err(SimulatorError::invalid_instruction(
                        name,
                        format!(
                            "expected value and optional start, got {} operand(s)",
                            operands.len()
                        ),
                    )),
                }
            }
            "read" | "measure" => {
                return match operands {
                    [] => Ok(Instruction::Read {
                        qubit: None,
                        basis: Basis::Computational,
                    }),
                    [q] => Ok(Instruction::Read {
                        qubit: Some(*q),
                        basis: Basis::Computational,
                    }),
                    _ => Err(operand_count(name, "0 or 1", operands.len())),
                }
            }
            "setglobalphase0" | "set_global_phase0" => {
                return Ok(Instruction::SetGlobalPhase0);
            }
            "swap" => {
                return match operands {
                    [i, j] => Ok(Instruction::Swap {
                        controls: Vec::new(),
                        i: *i,
                        j: *j,
                    }),
                    _ => Err(operand_count(name, "2", operands.len())),
                }
            }
            "cswap" | "fredkin" => {
                if operands.len() < 3 {
                    return Err(operand_count(name, "at least 3", operands.len()));
                }
                let (controls, pair) = operands.split_at(operands.len() - 2);
                return Ok(Instruction::Swap {
                    controls: controls.to_vec(),
                    i: pair[0],
                    j: pair[1],
                });
            }
            "toffoli" => {
                return Self::from_request("ccnot", operands, angle);
            }
            _ => {}
        }

        match Gate::from_name(&key, angle) {
            Ok(gate) => Ok(Instruction::Apply {
                gate,
                qubits: operands.to_vec(),
            }),
            Err(GateError::UnknownGate(_)) if key.starts_with('c') => {
                let base = key.trim_start_matches('c');
                let min_controls = key.len() - base.len();
                let gate = Gate::from_name(base, angle).map_err(|e| match e {
                    GateError::UnknownGate(_) => GateError::UnknownGate(name.to_string()),
                    other => other,
                })?;

                match operands.split_last() {
                    Some((&target, controls)) if controls.len() >= min_controls => {
                        Ok(Instruction::Controlled {
                            gate,
                            controls: controls.to_vec(),
                            target,
                        })
                    }
                    _ => Err(operand_count(
                        name,
                        &format!("at least {}", min_controls + 1),
                        operands.len(),
                    )),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn operand_count(name: &str, expected: &str, actual: usize) -> SimulatorError {
    SimulatorError::invalid_instruction(
        name,
        format!("expected {} qubit operand(s), got {}", expected, actual),
    )
}

impl Simulator {
    /// Carry out one instruction against the register
    pub fn execute(&mut self, instruction: &Instruction) -> Result<Outcome> {
        debug!(?instruction, "executing instruction");

        match instruction {
            Instruction::Reset { num_qubits } => {
                self.reset(*num_qubits)?;
                Ok(Outcome::Prepared(None))
            }
            Instruction::Write { value, start } => {
                self.write(*value, *start)?;
                Ok(Outcome::Prepared(None))
            }
            Instruction::WriteAmplitudes { amplitudes } => {
                self.write_amplitudes(amplitudes).map(Outcome::Prepared)
            }
            Instruction::WriteMagnitudePhase {
                magnitudes,
                phases_degrees,
            } => self
                .write_magnitude_phase(magnitudes, phases_degrees)
                .map(Outcome::Prepared),
            Instruction::WriteProbabilities { probabilities } => {
                self.write_probabilities(probabilities)?;
                Ok(Outcome::Prepared(None))
            }
            Instruction::Apply { gate, qubits } => self.apply(gate, qubits).map(Outcome::Applied),
            Instruction::Controlled {
                gate,
                controls,
                target,
            } => self
                .controlled(gate, controls, *target)
                .map(Outcome::Applied),
            Instruction::Swap { controls, i, j } => {
                let op = if controls.is_empty() {
                    self.swap(*i, *j)?
                } else {
                    self.controlled_swap(controls, *i, *j)?
                };
                Ok(Outcome::Applied(op))
            }
            Instruction::Read { qubit, basis } => self.read(*qubit, *basis).map(Outcome::Measured),
            Instruction::SetGlobalPhase0 => self.set_global_phase0().map(Outcome::Applied),
        }
    }

    /// Carry out instructions in order, stopping at the first failure
    pub fn execute_all(&mut self, instructions: &[Instruction]) -> Result<Vec<Outcome>> {
        instructions.iter().map(|i| self.execute(i)).collect()
    }
}
